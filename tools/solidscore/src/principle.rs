use serde::{Deserialize, Serialize};

// Declaration order is the canonical render order for score lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Principle {
    Srp,
    Ocp,
    Lsp,
    Isp,
    Dip,
}

impl Principle {
    pub const ALL: [Principle; 5] = [Self::Srp, Self::Ocp, Self::Lsp, Self::Isp, Self::Dip];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Srp => "SRP",
            Self::Ocp => "OCP",
            Self::Lsp => "LSP",
            Self::Isp => "ISP",
            Self::Dip => "DIP",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Srp => "srp",
            Self::Ocp => "ocp",
            Self::Lsp => "lsp",
            Self::Isp => "isp",
            Self::Dip => "dip",
        }
    }

    pub fn parse_hint(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "srp" => Some(Self::Srp),
            "ocp" => Some(Self::Ocp),
            "lsp" => Some(Self::Lsp),
            "isp" => Some(Self::Isp),
            "dip" => Some(Self::Dip),
            _ => None,
        }
    }
}
