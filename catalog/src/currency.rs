use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency used to display prices and to interpret price bounds in queries.
/// Catalog prices are stored in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCurrency {
    #[default]
    Usd,
    Idr,
}

const USD_TO_IDR: f64 = 16_000.0;

impl DisplayCurrency {
    pub fn code(self) -> &'static str {
        match self {
            DisplayCurrency::Usd => "USD",
            DisplayCurrency::Idr => "IDR",
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            DisplayCurrency::Usd => 1.0,
            DisplayCurrency::Idr => USD_TO_IDR,
        }
    }

    pub fn convert(self, usd: f64) -> f64 {
        usd * self.rate()
    }

    /// `$899` for USD, `Rp 14.384K` for IDR (rounded to thousands).
    pub fn format(self, usd: f64) -> String {
        match self {
            DisplayCurrency::Usd => format!("${}", group_thousands(usd.round() as u64, ',')),
            DisplayCurrency::Idr => {
                let idr = self.convert(usd).round();
                let k = (idr / 1000.0).round() as u64;
                format!("Rp {}K", group_thousands(k, '.'))
            }
        }
    }
}

impl fmt::Display for DisplayCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DisplayCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(DisplayCurrency::Usd),
            "idr" => Ok(DisplayCurrency::Idr),
            other => Err(format!("unsupported display currency: {other}")),
        }
    }
}

fn group_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
