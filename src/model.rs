use serde::Serialize;

pub const CLASS_LABEL: &str = "Turma";
pub const NAME_LABEL: &str = "ALUNO";
pub const CODE_LABEL: &str = "CÓDIGO";

/// One cell of a raw, headerless sheet grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    #[allow(dead_code)]
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Bool(_) => false,
        }
    }

    /// Text rendering used for labels and codes. Numbers keep their float
    /// form (`10.0`) so callers see the same artifact a text export would.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format!("{n:?}"),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

/// Headerless cell grid for one sheet. Row 0 is the first worksheet row.
pub type RawGrid = Vec<Vec<Cell>>;

/// A score value as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl From<&Cell> for CellValue {
    fn from(c: &Cell) -> Self {
        match c {
            Cell::Empty => CellValue::Empty,
            Cell::Text(s) if s.trim().is_empty() => CellValue::Empty,
            Cell::Text(s) => CellValue::Text(s.trim().to_string()),
            Cell::Number(n) if n.is_nan() => CellValue::Empty,
            Cell::Number(n) => CellValue::Number(*n),
            Cell::Bool(b) => CellValue::Bool(*b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub label: String,
    pub value: CellValue,
}

/// One student row: fixed identity fields plus the sheet's own score columns
/// in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub class_label: String,
    pub name: String,
    pub code: String,
    pub normalized_name: String,
    pub scores: Vec<ScoreEntry>,
}

impl StudentRecord {
    pub fn key(&self) -> String {
        crate::normalize::composite_key(&self.name, &self.code)
    }

    /// Value of a displayed column by label, identity fields included.
    #[allow(dead_code)]
    pub fn value(&self, label: &str) -> Option<CellValue> {
        match label {
            CLASS_LABEL => Some(CellValue::from(self.class_label.as_str())),
            NAME_LABEL => Some(CellValue::from(self.name.as_str())),
            CODE_LABEL => Some(CellValue::from(self.code.as_str())),
            _ => self
                .scores
                .iter()
                .find(|s| s.label == label)
                .map(|s| s.value.clone()),
        }
    }

    /// Scores in presentation order: labels known to `display_columns` first,
    /// then anything the record carries that the list does not mention.
    pub fn ordered_scores(&self, display_columns: &[String]) -> Vec<ScoreEntry> {
        let mut out: Vec<ScoreEntry> = Vec::with_capacity(self.scores.len());
        for col in display_columns {
            out.extend(self.scores.iter().filter(|s| &s.label == col).cloned());
        }
        for s in &self.scores {
            if !display_columns.iter().any(|c| c == &s.label) {
                out.push(s.clone());
            }
        }
        out
    }
}
