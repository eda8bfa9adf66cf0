use strum_macros::Display;

#[derive(Debug, Display)]
pub enum SettingsError {
    Io(std::io::Error),
    Encode(bincode::error::EncodeError),
    Decode(bincode::error::DecodeError),
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Display)]
pub enum HsiError {
    /// Bearing pointers are addressed as 1 and 2.
    InvalidPointer(u8),
    Settings(SettingsError),
}

impl std::error::Error for HsiError {}

impl From<SettingsError> for HsiError {
    fn from(value: SettingsError) -> Self { HsiError::Settings(value) }
}
