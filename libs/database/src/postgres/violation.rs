use sea_orm::{DbErr, RuntimeErr};

/// SQLSTATE classes the catalog distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// 23505
    Unique,
    /// 23503
    ForeignKey,
    /// 23502
    NotNull,
    /// 23514
    Check,
    /// 22P02, e.g. a malformed uuid literal
    InvalidTextRepresentation,
}

impl ViolationKind {
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Unique),
            "23503" => Some(Self::ForeignKey),
            "23502" => Some(Self::NotNull),
            "23514" => Some(Self::Check),
            "22P02" => Some(Self::InvalidTextRepresentation),
            _ => None,
        }
    }

    pub fn sqlstate(&self) -> &'static str {
        match self {
            Self::Unique => "23505",
            Self::ForeignKey => "23503",
            Self::NotNull => "23502",
            Self::Check => "23514",
            Self::InvalidTextRepresentation => "22P02",
        }
    }
}

/// A constraint failure reported by PostgreSQL, read from the structured
/// fields of the driver error rather than from its message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    /// Name of the violated constraint or index, when the server reports one.
    pub constraint: Option<String>,
}

impl ConstraintViolation {
    pub fn new(kind: ViolationKind, constraint: Option<&str>) -> Self {
        Self {
            kind,
            constraint: constraint.map(str::to_owned),
        }
    }

    /// Extract the violation carried by a failed statement, if any.
    ///
    /// Returns `None` for connection problems, decoding errors and every
    /// SQLSTATE outside [`ViolationKind`].
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        let runtime = match err {
            DbErr::Exec(runtime) | DbErr::Query(runtime) => runtime,
            _ => return None,
        };
        let RuntimeErr::SqlxError(sqlx_err) = runtime else {
            return None;
        };

        let db_err = sqlx_err.as_database_error()?;
        let kind = ViolationKind::from_sqlstate(&db_err.code()?)?;

        Some(Self::new(kind, db_err.constraint()))
    }

    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }
}
