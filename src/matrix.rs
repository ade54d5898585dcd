//! Contribution Matrix
//!
//! The backend emits the monthly matrix in several shapes. `normalize_matrix`
//! is the only place that knows about them; everything downstream sees
//! `FamilyMatrixRow` with twelve canonical `MonthCell`s.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::format::month_name;
use crate::models::{BulkContributionRequest, FamilyConfig, MonthAmount};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthCell {
    pub paid: bool,
    pub exempt: bool,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Paid,
    Due,
    Exempt,
}

impl MonthCell {
    /// Exemption is displayed even when the month is also marked paid
    pub fn state(&self) -> CellState {
        if self.exempt {
            CellState::Exempt
        } else if self.paid {
            CellState::Paid
        } else {
            CellState::Due
        }
    }
}

impl CellState {
    pub fn label(&self) -> &'static str {
        match self {
            CellState::Paid => "Paid",
            CellState::Due => "Due",
            CellState::Exempt => "Exempt",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            CellState::Paid => "cell cell-paid",
            CellState::Due => "cell cell-due",
            CellState::Exempt => "cell cell-exempt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyMatrixRow {
    pub family_config_id: i64,
    pub head_name: String,
    pub monthly_amount: f64,
    pub cells: [MonthCell; 12],
}

impl FamilyMatrixRow {
    /// 1-based month
    pub fn cell(&self, month: u32) -> MonthCell {
        month
            .checked_sub(1)
            .and_then(|i| self.cells.get(i as usize))
            .copied()
            .unwrap_or_default()
    }

    pub fn paid_total(&self) -> f64 {
        self.cells
            .iter()
            .filter(|c| c.state() == CellState::Paid)
            .map(|c| c.amount)
            .sum()
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    pub fn exempt_months(&self) -> BTreeSet<u32> {
        (1..=12).filter(|m| self.cell(*m).exempt).collect()
    }
}

// ========================
// Shape normalization
// ========================

/// Accepts an array of families, `{families|data|matrix: [...]}`, or an
/// object keyed by family id
pub fn normalize_matrix(value: &Value) -> Vec<FamilyMatrixRow> {
    let (shape, keyed): (&str, Vec<(Option<&str>, &Value)>) = match value {
        Value::Array(items) => ("array", items.iter().map(|v| (None, v)).collect()),
        Value::Object(obj) => match ["families", "data", "matrix"].iter().find_map(|k| obj.get(*k)) {
            Some(Value::Array(items)) => ("wrapped array", items.iter().map(|v| (None, v)).collect()),
            Some(Value::Object(inner)) => ("wrapped map", inner.iter().map(|(k, v)| (Some(k.as_str()), v)).collect()),
            _ => ("keyed by family", obj.iter().map(|(k, v)| (Some(k.as_str()), v)).collect()),
        },
        _ => ("unrecognized", Vec::new()),
    };
    log::debug!("[VDF] matrix response shape: {} ({} entries)", shape, keyed.len());

    keyed
        .into_iter()
        .filter_map(|(key, entry)| {
            let fallback_id = key.and_then(|k| k.parse::<i64>().ok());
            let row = normalize_family(entry, fallback_id);
            if row.is_none() {
                log::warn!("[VDF] skipping matrix entry without family id");
            }
            row
        })
        .collect()
}

fn normalize_family(value: &Value, fallback_id: Option<i64>) -> Option<FamilyMatrixRow> {
    let obj = value.as_object()?;
    let family_config_id = first_i64(obj, &["familyConfigId", "familyId", "id"]).or(fallback_id)?;
    let head_name = first_str(obj, &["headName", "familyHead", "name"]).unwrap_or_default();
    let monthly_amount = first_f64(obj, &["monthlyAmount", "amount"]).unwrap_or(0.0);

    let mut cells = [MonthCell::default(); 12];
    for (i, cell) in cells.iter_mut().enumerate() {
        let month = i as u32 + 1;
        let entry = month_entry(obj.get("months"), month);

        cell.paid = indexed(obj.get("paidMonths"), i)
            .and_then(truthy)
            .or_else(|| entry.and_then(paid_of))
            .unwrap_or(false);

        cell.amount = indexed(obj.get("amounts"), i)
            .and_then(Value::as_f64)
            .or_else(|| entry.and_then(amount_of))
            .unwrap_or(0.0);

        // Exempt if any shape marks it, regardless of the others
        cell.exempt = [
            indexed(obj.get("exemptedMonths"), i),
            month_entry(obj.get("exemptions"), month),
            entry.and_then(nested_exempt),
        ]
        .into_iter()
        .flatten()
        .any(marks_exempt);
    }

    Some(FamilyMatrixRow { family_config_id, head_name, monthly_amount, cells })
}

fn first_i64(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|k| {
        obj.get(*k).and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
    })
}

fn first_f64(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_f64))
}

fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_str).map(str::to_string))
}

fn indexed(value: Option<&Value>, index: usize) -> Option<&Value> {
    value?.as_array()?.get(index)
}

/// Map keyed by `"1"`/`"01"`, or a 12-element array
fn month_entry(value: Option<&Value>, month: u32) -> Option<&Value> {
    match value? {
        Value::Object(map) => map
            .get(&month.to_string())
            .or_else(|| map.get(&format!("{:02}", month)))
            .or_else(|| map.get(month_name(month))),
        Value::Array(items) => items.get(month as usize - 1),
        _ => None,
    }
}

fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::Null => Some(false),
        Value::String(s) => Some(matches!(s.as_str(), "true" | "1" | "yes")),
        Value::Object(_) | Value::Array(_) => None,
    }
}

fn paid_of(entry: &Value) -> Option<bool> {
    match entry {
        Value::Object(obj) => obj
            .get("paid")
            .or_else(|| obj.get("isPaid"))
            .and_then(truthy)
            .or_else(|| obj.get("amount").and_then(Value::as_f64).map(|a| a > 0.0)),
        other => truthy(other),
    }
}

fn amount_of(entry: &Value) -> Option<f64> {
    match entry {
        Value::Object(obj) => obj.get("amount").and_then(Value::as_f64),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn nested_exempt(entry: &Value) -> Option<&Value> {
    let obj = entry.as_object()?;
    obj.get("exempt")
        .or_else(|| obj.get("isExempt"))
        .or_else(|| obj.get("exempted"))
}

/// An exemption record (object or list) counts as exempt
fn marks_exempt(value: &Value) -> bool {
    match value {
        Value::Object(_) | Value::Array(_) => true,
        other => truthy(other).unwrap_or(false),
    }
}

// ========================
// Derived display values
// ========================

pub fn column_totals(rows: &[FamilyMatrixRow]) -> [f64; 12] {
    let mut totals = [0.0; 12];
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if cell.state() == CellState::Paid {
                totals[i] += cell.amount;
            }
        }
    }
    totals
}

/// Anything listed by family head
pub trait HeadName {
    fn head_name(&self) -> &str;
}

impl HeadName for FamilyConfig {
    fn head_name(&self) -> &str {
        &self.head_name
    }
}

impl HeadName for FamilyMatrixRow {
    fn head_name(&self) -> &str {
        &self.head_name
    }
}

/// Case-insensitive substring match on head name, original order kept
pub fn filter_by_head_name<T: HeadName + Clone>(items: &[T], term: &str) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.head_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// ========================
// Bulk edit
// ========================

/// Months with an amount are submitted (0 = delete); exempt months never are
pub fn build_bulk_payload(
    family_config_id: i64,
    year: i32,
    amounts: &BTreeMap<u32, f64>,
    exempt_months: &BTreeSet<u32>,
) -> BulkContributionRequest {
    let contributions = amounts
        .iter()
        .filter(|(month, _)| (1..=12).contains(*month) && !exempt_months.contains(*month))
        .map(|(month, amount)| MonthAmount { month: *month, amount: *amount })
        .collect();
    BulkContributionRequest { family_config_id, year, contributions }
}

/// Bulk edit form state: one text input per month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkForm {
    pub inputs: [String; 12],
    pub exempt: [bool; 12],
}

impl BulkForm {
    /// Paid months prefilled with their amount, others blank
    pub fn from_row(row: &FamilyMatrixRow) -> Self {
        let mut form = Self::default();
        for (i, cell) in row.cells.iter().enumerate() {
            form.exempt[i] = cell.exempt;
            if cell.paid && !cell.exempt {
                form.inputs[i] = trim_amount(cell.amount);
            }
        }
        form
    }

    /// Fill every blank, non-exempt month with `amount`
    pub fn fill_blank(&mut self, amount: f64) {
        for (i, input) in self.inputs.iter_mut().enumerate() {
            if !self.exempt[i] && input.trim().is_empty() {
                *input = trim_amount(amount);
            }
        }
    }

    /// Blank inputs are skipped; negative or non-numeric ones are rejected
    pub fn parse(&self) -> ApiResult<(BTreeMap<u32, f64>, BTreeSet<u32>)> {
        let mut amounts = BTreeMap::new();
        for (i, raw) in self.inputs.iter().enumerate() {
            let month = i as u32 + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => {
                    amounts.insert(month, v);
                }
                _ => {
                    return Err(ApiError::Validation(format!(
                        "{}: amount must be zero or more",
                        month_name(month)
                    )))
                }
            }
        }
        let exempt = (1..=12u32).filter(|m| self.exempt[*m as usize - 1]).collect();
        Ok((amounts, exempt))
    }

    pub fn to_request(&self, family_config_id: i64, year: i32) -> ApiResult<BulkContributionRequest> {
        let (amounts, exempt) = self.parse()?;
        let request = build_bulk_payload(family_config_id, year, &amounts, &exempt);
        if request.contributions.is_empty() {
            return Err(ApiError::Validation("Enter at least one month's amount".to_string()));
        }
        Ok(request)
    }
}

fn trim_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn family(id: i64, name: &str) -> FamilyConfig {
        FamilyConfig {
            id,
            head_name: name.to_string(),
            member_id: None,
            monthly_amount: 100.0,
            is_enabled: true,
            effective_from: None,
            total_paid: 0.0,
            total_due: 0.0,
            notes: None,
        }
    }

    #[test]
    fn test_exempt_wins_over_paid_array_shape() {
        let raw = json!({
            "familyConfigId": 1,
            "headName": "Ram",
            "paidMonths": [true, false, false, false, false, false, false, false, false, false, false, false],
            "exemptedMonths": [true, false, false, false, false, false, false, false, false, false, false, false]
        });
        let row = normalize_family(&raw, None).unwrap();
        assert_eq!(row.cell(1).state().label(), "Exempt");
        assert_eq!(row.cell(2).state().label(), "Due");
    }

    #[test]
    fn test_exempt_wins_over_paid_map_and_nested_shapes() {
        let raw = json!({
            "id": 2,
            "headName": "Shyam",
            "months": {
                "1": {"paid": true, "amount": 100, "isExempt": true},
                "2": {"paid": true, "amount": 150},
                "3": true
            },
            "exemptions": {"3": true}
        });
        let row = normalize_family(&raw, None).unwrap();
        assert_eq!(row.cell(1).state(), CellState::Exempt);
        assert_eq!(row.cell(2).state(), CellState::Paid);
        assert_eq!(row.cell(2).amount, 150.0);
        assert_eq!(row.cell(3).state(), CellState::Exempt);
        assert_eq!(row.paid_total(), 150.0);
    }

    #[test]
    fn test_exempt_in_nested_shape_overrides_false_array_flag() {
        let raw = json!({
            "id": 4,
            "exemptedMonths": [false, false, false, false, false, false, false, false, false, false, false, false],
            "months": {"1": {"paid": true, "amount": 100, "exempt": true}}
        });
        let row = normalize_family(&raw, None).unwrap();
        assert_eq!(row.cell(1).state(), CellState::Exempt);
        assert_eq!(row.paid_total(), 0.0);
    }

    #[test]
    fn test_exemption_record_object_counts_as_exempt() {
        let raw = json!({
            "id": 5,
            "paidMonths": [true, true],
            "exemptions": {"1": {"id": 77, "reason": "flood"}, "2": null}
        });
        let row = normalize_family(&raw, None).unwrap();
        assert_eq!(row.cell(1).state(), CellState::Exempt);
        assert_eq!(row.cell(2).state(), CellState::Paid);
    }

    #[test]
    fn test_array_paid_flag_checked_before_map() {
        let raw = json!({
            "id": 3,
            "paidMonths": [false],
            "months": {"1": {"paid": true, "amount": 100}}
        });
        let row = normalize_family(&raw, None).unwrap();
        assert!(!row.cell(1).paid);
        assert_eq!(row.cell(1).amount, 100.0);
    }

    #[test]
    fn test_normalize_matrix_envelopes() {
        let list = json!([{"id": 1, "headName": "A"}, {"headName": "no id"}]);
        assert_eq!(normalize_matrix(&list).len(), 1);

        let wrapped = json!({"families": [{"familyConfigId": 5, "headName": "B"}]});
        assert_eq!(normalize_matrix(&wrapped)[0].family_config_id, 5);

        let keyed = json!({"9": {"headName": "C", "paidMonths": [1, 0]}});
        let rows = normalize_matrix(&keyed);
        assert_eq!(rows[0].family_config_id, 9);
        assert!(rows[0].cell(1).paid);
    }

    #[test]
    fn test_bulk_payload_keeps_zero_and_drops_exempt() {
        let amounts = BTreeMap::from([(1, 100.0), (2, 0.0), (3, 100.0)]);
        let exempt = BTreeSet::from([3]);
        let payload = build_bulk_payload(4, 2024, &amounts, &exempt);

        assert_eq!(payload.year, 2024);
        assert_eq!(
            payload.contributions,
            vec![MonthAmount { month: 1, amount: 100.0 }, MonthAmount { month: 2, amount: 0.0 }]
        );
    }

    #[test]
    fn test_bulk_form_parse_and_validation() {
        let mut form = BulkForm::default();
        form.inputs[0] = "100".into();
        form.inputs[1] = "0".into();
        form.inputs[2] = "50".into();
        form.exempt[2] = true;

        let request = form.to_request(8, 2025).unwrap();
        let months: Vec<u32> = request.contributions.iter().map(|c| c.month).collect();
        assert_eq!(months, vec![1, 2]);

        form.inputs[4] = "-5".into();
        assert!(matches!(form.parse(), Err(ApiError::Validation(msg)) if msg.starts_with("May")));
    }

    #[test]
    fn test_bulk_form_from_row_and_fill() {
        let raw = json!({"id": 1, "months": {"1": {"paid": true, "amount": 100}}, "exemptedMonths": [false, true]});
        let row = normalize_family(&raw, None).unwrap();
        let mut form = BulkForm::from_row(&row);
        assert_eq!(form.inputs[0], "100");
        assert!(form.exempt[1]);

        form.fill_blank(75.5);
        assert_eq!(form.inputs[1], "");
        assert_eq!(form.inputs[2], "75.50");
        assert_eq!(form.inputs[0], "100");
    }

    #[test]
    fn test_filter_by_head_name_case_insensitive_in_order() {
        let families = vec![
            family(1, "Ram Bahadur"),
            family(2, "Sita Kumari"),
            family(3, "Hari Prasad"),
            family(4, "Gita Sharma"),
            family(5, "Krishna BAHADUR"),
        ];
        let filtered = filter_by_head_name(&families, "bahadur");
        let ids: Vec<i64> = filtered.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(filter_by_head_name(&families, "  ").len(), 5);
    }

    #[test]
    fn test_column_totals_skip_exempt() {
        let rows = normalize_matrix(&json!([
            {"id": 1, "paidMonths": [true], "amounts": [100]},
            {"id": 2, "paidMonths": [true], "amounts": [50], "exemptedMonths": [true]}
        ]));
        assert_eq!(column_totals(&rows)[0], 100.0);
    }
}
