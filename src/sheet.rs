use crate::model::{Cell, CellValue, RawGrid, ScoreEntry, StudentRecord};
use crate::model::{CLASS_LABEL, CODE_LABEL, NAME_LABEL};
use crate::normalize::{clean_code, fold_label, normalize_name};

/// Header rows further down than this are not looked for.
pub const HEADER_SCAN_ROWS: usize = 50;

const CODE_HEADER: &str = "codigo";
const NAME_HEADER: &str = "aluno";
const TRAILER_MARKER: &str = "anotacoes";

/// Cleaned records of one sheet. `columns` lists the labels in presentation
/// order, identity columns under their canonical labels.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub class_label: String,
    pub columns: Vec<String>,
    pub records: Vec<StudentRecord>,
}

impl SheetTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

enum Column {
    Code,
    Name,
    Score(String),
}

pub fn find_header_row(grid: &RawGrid) -> Option<usize> {
    grid.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let folded: Vec<String> = row.iter().map(|c| fold_label(&c.as_text())).collect();
        folded.iter().any(|v| v == CODE_HEADER) && folded.iter().any(|v| v == NAME_HEADER)
    })
}

/// Parses one headerless sheet grid. Sheets without a recognisable header
/// yield an empty table; that is not an error.
pub fn parse_sheet(grid: &RawGrid, sheet_label: &str) -> SheetTable {
    let empty = SheetTable {
        class_label: sheet_label.to_string(),
        ..SheetTable::default()
    };
    let Some(header_idx) = find_header_row(grid) else {
        return empty;
    };

    let header: Vec<String> = grid[header_idx]
        .iter()
        .map(|c| c.as_text().trim().to_string())
        .collect();
    let code_idx = header.iter().position(|h| fold_label(h) == CODE_HEADER);
    let name_idx = header.iter().position(|h| fold_label(h) == NAME_HEADER);
    let (Some(code_idx), Some(name_idx)) = (code_idx, name_idx) else {
        return empty;
    };

    let columns: Vec<(usize, Column)> = header
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            if i == code_idx {
                Some((i, Column::Code))
            } else if i == name_idx {
                Some((i, Column::Name))
            } else if label.is_empty() {
                None
            } else {
                Some((i, Column::Score(label.clone())))
            }
        })
        .collect();

    let body = &grid[header_idx + 1..];
    let end = body
        .iter()
        .position(|row| {
            row.first()
                .map(|c| fold_label(&c.as_text()) == TRAILER_MARKER)
                .unwrap_or(false)
        })
        .unwrap_or(body.len());

    let blank = Cell::Empty;
    let mut kept: Vec<(String, String, Vec<&Cell>)> = Vec::new();
    for row in &body[..end] {
        let cell = |i: usize| row.get(i).unwrap_or(&blank);
        let code = clean_code(&cell(code_idx).as_text());
        let name = cell(name_idx).as_text().trim().to_string();
        if code.is_empty() || name.is_empty() {
            continue;
        }
        let scores: Vec<&Cell> = columns
            .iter()
            .filter(|(_, c)| matches!(c, Column::Score(_)))
            .map(|(i, _)| cell(*i))
            .collect();
        kept.push((code, name, scores));
    }
    if kept.is_empty() {
        return empty;
    }

    // A score column survives only if some kept row has a value in it.
    let score_labels: Vec<&String> = columns
        .iter()
        .filter_map(|(_, c)| match c {
            Column::Score(label) => Some(label),
            _ => None,
        })
        .collect();
    let live: Vec<bool> = (0..score_labels.len())
        .map(|j| kept.iter().any(|(_, _, scores)| !scores[j].is_blank()))
        .collect();

    let mut labels = vec![CLASS_LABEL.to_string()];
    let mut j = 0;
    for (_, c) in &columns {
        match c {
            Column::Code => labels.push(CODE_LABEL.to_string()),
            Column::Name => labels.push(NAME_LABEL.to_string()),
            Column::Score(label) => {
                if live[j] {
                    labels.push(label.clone());
                }
                j += 1;
            }
        }
    }

    let records = kept
        .into_iter()
        .map(|(code, name, scores)| StudentRecord {
            class_label: sheet_label.to_string(),
            normalized_name: normalize_name(&name),
            name,
            code,
            scores: scores
                .into_iter()
                .zip(&score_labels)
                .zip(&live)
                .filter(|(_, live)| **live)
                .map(|((cell, label), _)| ScoreEntry {
                    label: (*label).clone(),
                    value: CellValue::from(cell),
                })
                .collect(),
        })
        .collect();

    SheetTable {
        class_label: sheet_label.to_string(),
        columns: labels,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|s| if s.is_empty() { Cell::Empty } else { Cell::text(*s) })
            .collect()
    }

    fn t3a_grid() -> RawGrid {
        vec![
            row(&["Controle de Notas", "", "", ""]),
            row(&["", "", "", ""]),
            row(&["Código", "ALUNO", "P1", "P2"]),
            row(&["10", "Ana Silva", "8", "9"]),
            row(&["11", "Beto Souza", "7", "6"]),
            row(&["Anotações", "", "", ""]),
            row(&["12", "Depois da Nota", "1", "1"]),
        ]
    }

    #[test]
    fn header_found_below_title_rows() {
        assert_eq!(find_header_row(&t3a_grid()), Some(2));
    }

    #[test]
    fn parses_rows_until_trailer() {
        let t = parse_sheet(&t3a_grid(), "T3A");
        assert_eq!(t.records.len(), 2);
        assert_eq!(t.columns, vec!["Turma", "CÓDIGO", "ALUNO", "P1", "P2"]);
        let ana = &t.records[0];
        assert_eq!(ana.class_label, "T3A");
        assert_eq!(ana.name, "Ana Silva");
        assert_eq!(ana.code, "10");
        assert_eq!(ana.normalized_name, "ANA SILVA");
        assert_eq!(ana.value("P1"), Some(CellValue::from("8")));
        assert!(t.records.iter().all(|r| r.name != "Depois da Nota"));
    }

    #[test]
    fn no_header_within_window_is_empty() {
        let mut grid: RawGrid = (0..HEADER_SCAN_ROWS).map(|_| row(&["x", "y"])).collect();
        grid.push(row(&["Código", "Aluno"]));
        grid.push(row(&["1", "Ana"]));
        assert!(parse_sheet(&grid, "late").is_empty());
        assert!(parse_sheet(&vec![row(&["Código", "Nome"])], "x").is_empty());
        assert!(parse_sheet(&RawGrid::new(), "blank").is_empty());
    }

    #[test]
    fn header_match_ignores_case_and_accents() {
        let grid = vec![
            row(&[" aluno ", "CODIGO", "Nota"]),
            row(&["Ana", "7", "10"]),
        ];
        let t = parse_sheet(&grid, "T1");
        assert_eq!(t.columns, vec!["Turma", "ALUNO", "CÓDIGO", "Nota"]);
        assert_eq!(t.records[0].code, "7");
    }

    #[test]
    fn numeric_codes_lose_float_suffix() {
        let grid = vec![
            row(&["Código", "Aluno"]),
            vec![Cell::Number(123.0), Cell::text(" Ana ")],
            vec![Cell::Number(124.0), Cell::Empty],
            vec![Cell::Empty, Cell::text("Sem Código")],
        ];
        let t = parse_sheet(&grid, "T1");
        assert_eq!(t.records.len(), 1);
        assert_eq!(t.records[0].code, "123");
        assert_eq!(t.records[0].name, "Ana");
    }

    #[test]
    fn blank_columns_are_pruned_and_extra_cells_truncated() {
        let grid = vec![
            row(&["Código", "Aluno", "P1", "Vazia", ""]),
            row(&["1", "Ana", "5", "", "lixo", "mais lixo"]),
            row(&["2", "Beto", "", "", "lixo"]),
        ];
        let t = parse_sheet(&grid, "T1");
        assert_eq!(t.columns, vec!["Turma", "CÓDIGO", "ALUNO", "P1"]);
        assert_eq!(t.records[1].scores.len(), 1);
        assert_eq!(t.records[1].scores[0].value, CellValue::Empty);
    }

    #[test]
    fn trailer_marker_accepts_unaccented_upper_case() {
        let grid = vec![
            row(&["Código", "Aluno"]),
            row(&["1", "Ana"]),
            row(&["ANOTACOES", ""]),
            row(&["2", "Beto"]),
        ];
        assert_eq!(parse_sheet(&grid, "T1").records.len(), 1);
    }
}
