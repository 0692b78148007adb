//! Fechas de vencimiento de documentos
//!
//! Las fechas se parsean una sola vez al ingresar al sistema. Un valor que no
//! se puede interpretar se conserva marcado (`Malformed` / `Missing`) para que
//! el evaluador de elegibilidad lo trate como vencido.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Formato canónico de fechas de documentos
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fecha de vencimiento de un documento (SOAT, RTM, licencia, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryDate {
    Date(NaiveDate),
    Malformed(String),
    Missing,
}

impl ExpiryDate {
    /// Interpreta un string `YYYY-MM-DD`; nunca falla, marca la entrada inválida
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ExpiryDate::Missing;
        }
        match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            Ok(date) => ExpiryDate::Date(date),
            Err(_) => ExpiryDate::Malformed(trimmed.to_string()),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ExpiryDate::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ExpiryDate::Date(_))
    }
}

impl From<NaiveDate> for ExpiryDate {
    fn from(date: NaiveDate) -> Self {
        ExpiryDate::Date(date)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryDate::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            ExpiryDate::Malformed(raw) => write!(f, "{}", raw),
            ExpiryDate::Missing => Ok(()),
        }
    }
}

impl Serialize for ExpiryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExpiryDate::Missing => serializer.serialize_none(),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ExpiryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| ExpiryDate::parse(&s)).unwrap_or(ExpiryDate::Missing))
    }
}

/// Estado de un documento respecto a la fecha actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Expired,
    NearExpiry,
    Valid,
}

/// Tipos de documento controlados por el evaluador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Soat,
    Rtm,
    OperatingCard,
    RccPolicy,
    RcePolicy,
    DriverLicense,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Soat => "SOAT",
            DocumentKind::Rtm => "RTM",
            DocumentKind::OperatingCard => "Tarjeta de Operación",
            DocumentKind::RccPolicy => "Póliza RCC",
            DocumentKind::RcePolicy => "Póliza RCE",
            DocumentKind::DriverLicense => "Licencia de conducción",
        }
    }

    /// Motivo legible cuando el documento está vencido
    pub fn expired_reason(&self) -> &'static str {
        match self {
            DocumentKind::Soat => "SOAT vencido",
            DocumentKind::Rtm => "RTM vencida",
            DocumentKind::OperatingCard => "Tarjeta de Operación vencida",
            DocumentKind::RccPolicy => "Póliza RCC vencida",
            DocumentKind::RcePolicy => "Póliza RCE vencida",
            DocumentKind::DriverLicense => "Licencia de conducción vencida",
        }
    }

    /// Advertencia cuando el documento está próximo a vencer
    pub fn near_expiry_warning(&self) -> String {
        format!("{} próximo a vencer", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = ExpiryDate::parse("2028-03-15");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2028, 3, 15));
    }

    #[test]
    fn test_parse_flags_bad_input() {
        assert_eq!(ExpiryDate::parse("15/03/2028"), ExpiryDate::Malformed("15/03/2028".to_string()));
        assert_eq!(ExpiryDate::parse("2028-02-30"), ExpiryDate::Malformed("2028-02-30".to_string()));
        assert_eq!(ExpiryDate::parse("   "), ExpiryDate::Missing);
    }

    #[test]
    fn test_serde_keeps_raw_value() {
        let parsed: ExpiryDate = serde_json::from_str("\"not-a-date\"").unwrap();
        assert!(!parsed.is_valid());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"not-a-date\"");

        let missing: ExpiryDate = serde_json::from_str("null").unwrap();
        assert_eq!(missing, ExpiryDate::Missing);
    }
}
