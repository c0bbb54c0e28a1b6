// Company details for document headers.
//
// The settings screen stores a flat record; documents want a name, the
// address already split into printable lines, and only the contact fields
// that were actually filled in.

use serde::{Deserialize, Serialize};

/// Name printed when the settings have no company name
pub const DEFAULT_COMPANY_NAME: &str = "Integra";

/// Company settings as saved by the settings screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    /// Matricule fiscal
    pub tax_id: String,
    /// RIB
    pub bank_account: String,
}

/// Company block of an invoice or quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub tax_id: Option<String>,
    pub bank_account: Option<String>,
}

impl CompanyInfo {
    pub fn from_settings(settings: &CompanySettings) -> Self {
        let name = non_blank(&settings.company_name)
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());

        let locality = [&settings.postal_code, &settings.city]
            .iter()
            .filter_map(|part| non_blank(part))
            .collect::<Vec<_>>()
            .join(" ");

        let address_lines = [
            non_blank(&settings.address),
            non_blank(&locality),
            non_blank(&settings.country),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            name,
            address_lines,
            phone: non_blank(&settings.phone),
            email: non_blank(&settings.email),
            website: non_blank(&settings.website),
            tax_id: non_blank(&settings.tax_id),
            bank_account: non_blank(&settings.bank_account),
        }
    }
}

impl From<&CompanySettings> for CompanyInfo {
    fn from(settings: &CompanySettings) -> Self {
        Self::from_settings(settings)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
