use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Branch name used when a record carries none
pub const UNKNOWN_BRANCH: &str = "Unknown";

/// Full English month name -> three-letter abbreviation
pub const MONTH_ABBREVIATIONS: [(&str, &str); 12] = [
    ("January", "Jan"),
    ("February", "Feb"),
    ("March", "Mar"),
    ("April", "Apr"),
    ("May", "May"),
    ("June", "Jun"),
    ("July", "Jul"),
    ("August", "Aug"),
    ("September", "Sep"),
    ("October", "Oct"),
    ("November", "Nov"),
    ("December", "Dec"),
];

/// Abbreviate a full month name. Unmapped names are returned unchanged.
pub fn abbreviate_month(month: &str) -> &str {
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(full, _)| *full == month)
        .map(|(_, short)| *short)
        .unwrap_or(month)
}

/// 1-based month number for a full or abbreviated English month name
pub fn month_ordinal(month: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|(full, short)| *full == month || *short == month)
        .map(|idx| idx as u32 + 1)
}

/// Year as found in the source files: a number, a numeric string or empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Year {
    /// Numeric value of the year, if it has one
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Year::Number(n) => Some(*n),
            Year::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Read a year out of raw JSON: integers (or integral floats) and strings.
    /// Anything else has no year.
    pub fn from_value(value: &Value) -> Option<Year> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Year::Number),
            Value::String(s) => Some(Year::Text(s.clone())),
            _ => None,
        }
    }

    /// Empty string or zero
    pub fn is_empty(&self) -> bool {
        match self {
            Year::Number(n) => *n == 0,
            Year::Text(s) => s.is_empty(),
        }
    }
}

impl Default for Year {
    fn default() -> Self {
        Year::Text(String::new())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

/// LPG cylinder weight class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TankSize {
    #[serde(rename = "11kg")]
    Kg11,
    #[serde(rename = "22kg")]
    Kg22,
    #[serde(rename = "27kg")]
    Kg27,
    #[serde(rename = "50kg")]
    Kg50,
}

impl TankSize {
    pub const ALL: [TankSize; 4] = [TankSize::Kg11, TankSize::Kg22, TankSize::Kg27, TankSize::Kg50];

    pub fn label(&self) -> &'static str {
        match self {
            TankSize::Kg11 => "11kg",
            TankSize::Kg22 => "22kg",
            TankSize::Kg27 => "27kg",
            TankSize::Kg50 => "50kg",
        }
    }

    pub fn weight_kg(&self) -> i64 {
        match self {
            TankSize::Kg11 => 11,
            TankSize::Kg22 => 22,
            TankSize::Kg27 => 27,
            TankSize::Kg50 => 50,
        }
    }
}

/// Units sold per cylinder size. Missing sizes count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TankSales {
    #[serde(rename = "11kg", default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub kg11: Option<i64>,
    #[serde(rename = "22kg", default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub kg22: Option<i64>,
    #[serde(rename = "27kg", default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub kg27: Option<i64>,
    #[serde(rename = "50kg", default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub kg50: Option<i64>,
}

impl TankSales {
    pub fn count(&self, size: TankSize) -> i64 {
        let value = match size {
            TankSize::Kg11 => self.kg11,
            TankSize::Kg22 => self.kg22,
            TankSize::Kg27 => self.kg27,
            TankSize::Kg50 => self.kg50,
        };
        value.unwrap_or(0)
    }

    /// Total LPG weight sold, in kg
    pub fn volume_kg(&self) -> i64 {
        TankSize::ALL
            .iter()
            .map(|size| self.count(*size) * size.weight_kg())
            .sum()
    }
}

/// Monetary columns of a sale record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyField {
    Gross,
    Net,
    Deposit,
    Expenses,
    Gcash,
}

impl MoneyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoneyField::Gross => "gross",
            MoneyField::Net => "net",
            MoneyField::Deposit => "deposit",
            MoneyField::Expenses => "expenses",
            MoneyField::Gcash => "gcash",
        }
    }
}

impl FromStr for MoneyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gross" => Ok(MoneyField::Gross),
            "net" => Ok(MoneyField::Net),
            "deposit" => Ok(MoneyField::Deposit),
            "expenses" => Ok(MoneyField::Expenses),
            "gcash" => Ok(MoneyField::Gcash),
            other => Err(format!("Unknown money field: {}", other)),
        }
    }
}

/// One daily sales entry of a branch, with branch/month/year injected
/// from the source document it came from.
///
/// Every field is read best-effort: a value of the wrong type falls back to
/// the field's default instead of rejecting the whole entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Year,

    /// Day of month
    #[serde(default, deserialize_with = "lenient_day")]
    pub date: u32,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub gross: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub deposit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub expenses: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub gcash: Option<f64>,

    #[serde(default, deserialize_with = "lenient_tank_sales")]
    pub tank_sales: Option<TankSales>,
}

/// Finite number from a JSON number or numeric string
fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

/// String fields also accept numbers ("branch": 7 reads as "7")
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Year, D::Error> {
    Ok(Year::from_value(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(number_of(&Value::deserialize(deserializer)?)
        .filter(|day| *day >= 0.0)
        .map(|day| day as u32)
        .unwrap_or(0))
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(number_of(&Value::deserialize(deserializer)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(number_of(&Value::deserialize(deserializer)?).map(|count| count as i64))
}

fn lenient_tank_sales<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TankSales>, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

impl SaleRecord {
    /// Branch the sale belongs to
    pub fn location(&self) -> &str {
        if self.branch.is_empty() {
            UNKNOWN_BRANCH
        } else {
            &self.branch
        }
    }

    /// "Jan 5, 2026"
    pub fn display_date(&self) -> String {
        format!("{} {}, {}", abbreviate_month(&self.month), self.date, self.year)
    }

    pub fn money(&self, field: MoneyField) -> f64 {
        let value = match field {
            MoneyField::Gross => self.gross,
            MoneyField::Net => self.net,
            MoneyField::Deposit => self.deposit,
            MoneyField::Expenses => self.expenses,
            MoneyField::Gcash => self.gcash,
        };
        value.unwrap_or(0.0)
    }

    pub fn tank_count(&self, size: TankSize) -> i64 {
        self.tank_sales.as_ref().map(|t| t.count(size)).unwrap_or(0)
    }

    /// "27kg: 3, 11kg: 10, 22kg: 0, 50kg: 1", or "-" without tank data
    pub fn tank_sales_summary(&self) -> String {
        match &self.tank_sales {
            None => "-".to_string(),
            Some(t) => format!(
                "27kg: {}, 11kg: {}, 22kg: {}, 50kg: {}",
                t.count(TankSize::Kg27),
                t.count(TankSize::Kg11),
                t.count(TankSize::Kg22),
                t.count(TankSize::Kg50)
            ),
        }
    }

    /// (year, month, day) sort key. Unknown months and non-numeric years count as 0.
    pub fn date_key(&self) -> (i64, u32, u32) {
        let year = self.year.as_number().unwrap_or(0);
        let month = month_ordinal(&self.month).unwrap_or(0);
        (year, month, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: &str, date: u32, year: Year) -> SaleRecord {
        SaleRecord {
            month: month.to_string(),
            date,
            year,
            ..Default::default()
        }
    }

    #[test]
    fn test_display_date_abbreviates_known_months() {
        let r = record("January", 5, Year::Number(2026));
        assert_eq!(r.display_date(), "Jan 5, 2026");

        let r = record("September", 30, Year::Text("2025".into()));
        assert_eq!(r.display_date(), "Sep 30, 2025");
    }

    #[test]
    fn test_display_date_passes_unmapped_month_through() {
        let r = record("Unmapped", 1, Year::Number(2025));
        assert_eq!(r.display_date(), "Unmapped 1, 2025");
    }

    #[test]
    fn test_location_defaults_to_unknown() {
        let mut r = SaleRecord::default();
        assert_eq!(r.location(), "Unknown");
        r.branch = "GULOD".into();
        assert_eq!(r.location(), "GULOD");
    }

    #[test]
    fn test_year_deserializes_number_and_string() {
        let n: Year = serde_json::from_str("2026").unwrap();
        let s: Year = serde_json::from_str("\"2025\"").unwrap();
        let e: Year = serde_json::from_str("\"\"").unwrap();
        assert_eq!(n.as_number(), Some(2026));
        assert_eq!(s.as_number(), Some(2025));
        assert!(e.is_empty());
        assert_eq!(e.as_number(), None);
    }

    #[test]
    fn test_record_missing_fields_default() {
        let r: SaleRecord =
            serde_json::from_str(r#"{"date": 3, "gross": 1500, "net": null}"#).unwrap();
        assert_eq!(r.money(MoneyField::Gross), 1500.0);
        assert_eq!(r.money(MoneyField::Net), 0.0);
        assert_eq!(r.money(MoneyField::Gcash), 0.0);
        assert_eq!(r.tank_count(TankSize::Kg50), 0);
        assert_eq!(r.tank_sales_summary(), "-");
    }

    #[test]
    fn test_tank_sales_keys_and_summary() {
        let r: SaleRecord = serde_json::from_str(
            r#"{"date": 1, "tank_sales": {"11kg": 10, "27kg": 3, "50kg": 1}}"#,
        )
        .unwrap();
        assert_eq!(r.tank_count(TankSize::Kg11), 10);
        assert_eq!(r.tank_count(TankSize::Kg22), 0);
        assert_eq!(r.tank_sales_summary(), "27kg: 3, 11kg: 10, 22kg: 0, 50kg: 1");
        assert_eq!(r.tank_sales.unwrap().volume_kg(), 10 * 11 + 3 * 27 + 50);
    }

    #[test]
    fn test_date_key_orders_across_years() {
        let dec = record("December", 31, Year::Number(2025));
        let jan = record("January", 1, Year::Text("2026".into()));
        assert!(dec.date_key() < jan.date_key());
        assert_eq!(jan.date_key(), (2026, 1, 1));
        assert_eq!(month_ordinal("Mar"), Some(3));
        assert_eq!(month_ordinal("Smarch"), None);
    }

    #[test]
    fn test_money_field_parsing() {
        assert_eq!("gcash".parse::<MoneyField>(), Ok(MoneyField::Gcash));
        assert!("tips".parse::<MoneyField>().is_err());
        assert_eq!(MoneyField::Expenses.as_str().parse::<MoneyField>(), Ok(MoneyField::Expenses));
    }

    #[test]
    fn test_date_key_handles_huge_years() {
        let far = record("March", 2, Year::Text("900000000000000000".into()));
        let near = record("March", 2, Year::Number(2026));
        assert_eq!(far.date_key(), (900_000_000_000_000_000, 3, 2));
        assert!(near.date_key() < far.date_key());
    }

    #[test]
    fn test_mistyped_fields_default_instead_of_dropping_record() {
        let r: SaleRecord = serde_json::from_str(
            r#"{"date": "2", "gross": 5000, "net": "1200.5", "deposit": true,
                "year": 2026.0, "branch": 7, "tank_sales": {"11kg": 2.0, "22kg": "x"}}"#,
        )
        .unwrap();
        assert_eq!(r.date, 2);
        assert_eq!(r.money(MoneyField::Gross), 5000.0);
        assert_eq!(r.money(MoneyField::Net), 1200.5);
        assert_eq!(r.money(MoneyField::Deposit), 0.0);
        assert_eq!(r.year, Year::Number(2026));
        assert_eq!(r.location(), "7");
        assert_eq!(r.tank_count(TankSize::Kg11), 2);
        assert_eq!(r.tank_count(TankSize::Kg22), 0);

        let r: SaleRecord =
            serde_json::from_str(r#"{"date": [1], "gross": "NaN", "tank_sales": [3]}"#).unwrap();
        assert_eq!(r.date, 0);
        assert_eq!(r.money(MoneyField::Gross), 0.0);
        assert_eq!(r.tank_sales_summary(), "-");
    }
}
