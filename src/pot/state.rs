//! The pot state machine.

use serde::Deserialize;

use crate::http::response::StatusCode;

pub const TEAPOT_MEDIA_TYPE: &str = "message/teapot";
pub const COFFEEPOT_MEDIA_TYPES: [&str; 2] = ["message/coffeepot", "application/coffee-pot-command"];

/// Payload sent with 418 when a coffee pot is asked to brew tea.
pub const TEAPOT_ART: &str = r#"

    -=[ teapot ]=-

       _...._
     .'  _ _ `.
    | ."` ^ `". _,
    \_;`"---"`|//
      |       ;/
      \_     _/
        `"""`

"#;

/// Which kind of pot sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotKind {
    /// Accepts `message/coffeepot` or `application/coffee-pot-command`.
    Coffee,
    /// Accepts `message/teapot` only.
    Tea,
}

impl PotKind {
    pub fn accepts(&self, media_type: &str) -> bool {
        match self {
            PotKind::Coffee => COFFEEPOT_MEDIA_TYPES.contains(&media_type),
            PotKind::Tea => media_type == TEAPOT_MEDIA_TYPE,
        }
    }

    fn reject(&self) -> BrewError {
        match self {
            PotKind::Coffee => BrewError::Teapot,
            PotKind::Tea => BrewError::UnsupportedMediaType {
                drink: "tea",
                accepted: TEAPOT_MEDIA_TYPE,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PotKind::Coffee => "CoffeePot",
            PotKind::Tea => "TeaPot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotStatus {
    Idle,
    Brewing,
}

impl std::fmt::Display for PotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PotStatus::Idle => "idle",
            PotStatus::Brewing => "brewing",
        })
    }
}

/// A brew command the pot refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrewError {
    #[error("Sorry, I can only brew {drink} ({accepted}).")]
    UnsupportedMediaType {
        drink: &'static str,
        accepted: &'static str,
    },

    #[error("{}", TEAPOT_ART)]
    Teapot,

    #[error("I'm already brewing!")]
    AlreadyBrewing,
}

impl BrewError {
    pub fn status(&self) -> StatusCode {
        match self {
            BrewError::UnsupportedMediaType { .. } => StatusCode::UnsupportedMediaType,
            BrewError::Teapot => StatusCode::ImATeapot,
            BrewError::AlreadyBrewing => StatusCode::Conflict,
        }
    }
}

/// What every pot can be asked to do.
pub trait Brew {
    /// Starts brewing with the given additions.
    fn start(&mut self, media_type: &str, additions: Vec<String>) -> Result<String, BrewError>;

    /// Stops brewing. Stopping an idle pot succeeds.
    fn stop(&mut self, media_type: &str) -> Result<String, BrewError>;
}

#[derive(Debug, Clone)]
pub struct Pot {
    path: String,
    kind: PotKind,
    status: PotStatus,
    additions: Vec<String>,
}

impl Pot {
    pub fn new(path: impl Into<String>, kind: PotKind) -> Self {
        Self {
            path: path.into(),
            kind,
            status: PotStatus::Idle,
            additions: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> PotKind {
        self.kind
    }

    pub fn status(&self) -> PotStatus {
        self.status
    }

    pub fn additions(&self) -> &[String] {
        &self.additions
    }

    /// One-line summary, e.g. `/pot-0: CoffeePot @ brewing < [ milk ]`.
    pub fn info(&self) -> String {
        format!(
            "{}: {} @ {} < [ {} ]",
            self.path,
            self.kind.name(),
            self.status,
            self.additions.join(", ")
        )
    }
}

impl Brew for Pot {
    fn start(&mut self, media_type: &str, additions: Vec<String>) -> Result<String, BrewError> {
        if !self.kind.accepts(media_type) {
            return Err(self.kind.reject());
        }
        if self.status == PotStatus::Brewing {
            return Err(BrewError::AlreadyBrewing);
        }

        self.status = PotStatus::Brewing;
        self.additions = additions;
        tracing::debug!(pot = %self.info(), "Started brewing");
        Ok(format!("{}: Starting brewing...", self.path))
    }

    fn stop(&mut self, media_type: &str) -> Result<String, BrewError> {
        if !self.kind.accepts(media_type) {
            return Err(self.kind.reject());
        }

        self.status = PotStatus::Idle;
        self.additions.clear();
        tracing::debug!(pot = %self.info(), "Stopped brewing");
        Ok(format!("{}: Stopped brewing...", self.path))
    }
}
