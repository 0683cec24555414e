use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Brl => "BRL",
            Self::Usd => "USD",
        }
    }

    const fn separators(self) -> (char, char) {
        match self {
            Self::Brl => ('.', ','),
            Self::Usd => (',', '.'),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported currency '{}', expected BRL or USD", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::Brl),
            "USD" => Ok(Self::Usd),
            _ => Err(UnknownCurrency(value.to_string())),
        }
    }
}

/// Two-decimal amount with thousands grouping, e.g. `R$ 1.234,56` or `$1,234.56`.
///
/// The sign sits after the symbol: `R$ -1.000,00`.
pub fn format_currency(value: f64, currency: Currency) -> String {
    let (thousands, decimal) = currency.separators();
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    match currency {
        Currency::Brl => format!("R$ {sign}{grouped}{decimal}{cents}"),
        Currency::Usd => format!("${sign}{grouped}{decimal}{cents}"),
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Human-readable duration; a payback that never happens reads `Indefinido`.
pub fn format_months(months: f64) -> String {
    if !months.is_finite() {
        return "Indefinido".to_string();
    }

    let years = (months / 12.0).floor() as i64;
    let remaining = months.rem_euclid(12.0).floor() as i64;

    match (years > 0, remaining > 0) {
        (true, true) => format!("{years}a {remaining}m"),
        (true, false) if years == 1 => "1 ano".to_string(),
        (true, false) => format!("{years} anos"),
        _ if remaining > 1 => format!("{remaining} meses"),
        _ => format!("{remaining} mês"),
    }
}
