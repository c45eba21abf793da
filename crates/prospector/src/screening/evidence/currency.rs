use serde::{Deserialize, Serialize};

/// Static conversion constants. Not live market data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub clp_per_usd: f64,
    pub clp_per_uf: f64,
}

impl ExchangeRates {
    pub fn standard() -> Self {
        Self {
            clp_per_usd: 950.0,
            clp_per_uf: 38_000.0,
        }
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::standard()
    }
}

const MILLION: f64 = 1_000_000.0;

/// Converts a raw money excerpt into million USD.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyNormalizer {
    rates: ExchangeRates,
}

impl CurrencyNormalizer {
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> ExchangeRates {
        self.rates
    }

    /// Returns 0.0 when the excerpt is absent or carries no usable figure.
    ///
    /// `,` and `.` are both read as grouping marks, so decimals are lost
    /// ("12,5" reads as 125). The longest numeric run wins; ties go to the
    /// last one found. Only `mm` and `millones` scale the figure; a lone `M`
    /// does not, so "US$ 60 M" reads as 60 USD.
    pub fn to_usd_millions(&self, excerpt: Option<&str>) -> f64 {
        let Some(raw) = excerpt.filter(|raw| !raw.trim().is_empty()) else {
            return 0.0;
        };

        let compact: String = raw
            .to_lowercase()
            .replace(',', ".")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let Some(magnitude) = longest_numeric_run(&compact) else {
            return 0.0;
        };

        let digits: String = magnitude.chars().filter(char::is_ascii_digit).collect();
        let Ok(value) = digits.parse::<f64>() else {
            return 0.0;
        };

        let scale = if compact.contains("mm") || compact.contains("millones") {
            MILLION
        } else {
            1.0
        };
        let nominal = value * scale;

        let usd = if compact.contains("us") {
            nominal
        } else if compact.contains("uf") {
            nominal * self.rates.clp_per_uf / self.rates.clp_per_usd
        } else {
            nominal / self.rates.clp_per_usd
        };

        let millions = round2(usd / MILLION);
        if millions.is_finite() && millions >= 0.0 {
            millions
        } else {
            0.0
        }
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::new(ExchangeRates::standard())
    }
}

fn longest_numeric_run(compact: &str) -> Option<&str> {
    compact
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|run| run.chars().any(|c| c.is_ascii_digit()))
        .fold(None, |best: Option<&str>, run| match best {
            Some(current) if current.len() > run.len() => Some(current),
            _ => Some(run),
        })
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
