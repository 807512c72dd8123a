use std::fmt;
use std::str::FromStr;

/// Deployment stage, read from `APP_ENVIRONMENT`. Picks the `appsettings.*.toml` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Test,
    Prod,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown APP_ENVIRONMENT `{0}`, use local, test or prod")]
pub struct UnknownEnvironment(String);

impl Environment {
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }

    /// Settings file stem, resolved relative to the working directory.
    pub fn settings_file(self) -> String {
        format!("appsettings.{}", self.name())
    }

    pub fn is_production(self) -> bool {
        self == Self::Prod
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "local" | "dev" | "development" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(UnknownEnvironment(raw.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
