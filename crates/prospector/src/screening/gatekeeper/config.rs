use serde::{Deserialize, Serialize};

/// Token tables backing the eligibility rules.
///
/// Institutional and intangible tokens match against the lowercased raw
/// name; the remaining tables match against the normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperRules {
    pub institutional: Vec<String>,
    pub intangible: Vec<String>,
    /// Known public-market issuers, compared by exact normalized name.
    pub listed_issuers: Vec<String>,
    pub multinationals: Vec<String>,
    pub financial: Vec<String>,
}

impl GatekeeperRules {
    pub fn standard() -> Self {
        Self {
            institutional: strings(&[
                "ministerio",
                "ministry",
                "subsecretaria",
                "gobierno",
                "government",
                "municipalidad",
                "municipality",
                "hospital",
                "servicio de salud",
                "red hospitalaria",
                "clinico regional",
                "cochilco",
                "sernagesomin",
                "enami",
                "codelco",
                "corfo",
                "corporacion",
                "fundacion",
                "foundation",
                "mutual",
                "achs",
                "gremio",
                "asociacion",
                "association",
                "camara",
                "sindicato",
                "universidad estatal",
                "university",
                "liceo",
                "escuela",
                "juzgado",
            ]),
            intangible: strings(&[
                "certificacio",
                "certification",
                "benchmark",
                "ranking",
                "rating",
                "indice",
                "índice",
                "place to live",
                "place to work",
                "consultoria",
                "consultoría",
                "consulting",
                "research",
                "intelligence",
                "estudio de mercado",
                "medicion",
                "satisfaccion",
                "percepcion",
                "insight",
                "analytic",
                "premio",
                "award",
                "merco",
                "monitor",
            ]),
            listed_issuers: strings(&[
                "CODELCO",
                "ENAP",
                "COLBUN",
                "FALABELLA",
                "CENCOSUD",
                "LATAM",
                "SOCOVESA",
                "BESALCO",
                "PAZ CORP",
                "SMU",
                "CCU",
                "EMBOTELLADORA ANDINA",
                "SALFACORP",
                "ECHEVERRÍA IZQUIERDO",
                "CAP",
                "VAPORES",
            ]),
            multinationals: strings(&[
                "google",
                "microsoft",
                "amazon",
                "aws",
                "enel",
                "engie",
                "colbun",
                "walmart",
                "falabella",
                "cencosud",
                "latam",
                "bayer",
                "nestle",
                "unilever",
                "coca cola",
                "pepsico",
                "procter",
                "bhp",
                "anglo american",
            ]),
            financial: strings(&[
                "banco",
                "bank",
                "inversiones",
                "investment",
                "rentas",
                "capital",
                "partners",
                "seguros",
                "insurance",
                "financial",
                "factoring",
                "leasing",
                "corredora",
            ]),
        }
    }
}

impl Default for GatekeeperRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
