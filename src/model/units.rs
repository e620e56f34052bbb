#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
pub enum Unit {
    #[value(name = "um")]
    #[serde(rename = "um")]
    Micrometers,
    #[value(name = "px")]
    #[serde(rename = "px")]
    Pixels,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Micrometers => "µm",
            Unit::Pixels => "px",
        }
    }
}
