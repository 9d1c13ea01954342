#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// A fixture cell: text, a number, or nothing.
pub enum Fx<'a> {
    S(&'a str),
    N(f64),
    Blank,
}

pub fn text_rows<'a>(rows: &[&[&'a str]]) -> Vec<Vec<Fx<'a>>> {
    rows.iter()
        .map(|r| {
            r.iter()
                .map(|v| if v.is_empty() { Fx::Blank } else { Fx::S(*v) })
                .collect()
        })
        .collect()
}

pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Fx<'_>>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).expect("sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match v {
                    Fx::S(s) => {
                        sheet.write_string(r, c, *s).expect("write string");
                    }
                    Fx::N(n) => {
                        sheet.write_number(r, c, *n).expect("write number");
                    }
                    Fx::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

/// Two header lines above the data, a notes trailer, then junk.
pub fn t3a_rows() -> Vec<Vec<Fx<'static>>> {
    text_rows(&[
        &["Controle de Notas - 1º Bimestre", "", "", ""],
        &["", "", "", ""],
        &["Código", "ALUNO", "P1", "P2"],
        &["10", "Ana Silva", "8", "9"],
        &["11", "Beto Souza", "7", "6"],
        &["Anotações", "", "", ""],
        &["Prova remarcada para sexta", "", "", ""],
        &["99", "Linha Fantasma", "0", "0"],
    ])
}
