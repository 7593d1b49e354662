//! psql-style rendering for sequences and tables

use std::fmt;

use tabled::builder::Builder;
use tabled::settings::Style;

use super::seq::Seq;
use super::table::Table;

fn render(header: Vec<String>, rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    let mut grid = builder.build();
    grid.with(Style::psql());
    grid.to_string()
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = vec![String::new(), self.name().to_string()];
        let rows = self
            .iter()
            .enumerate()
            .map(|(i, v)| vec![i.to_string(), v.display()]);
        write!(f, "{}", render(header, rows))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![String::new()];
        header.extend(self.cols().iter().map(|c| c.to_string()));
        let rows = self.rows().enumerate().map(|(i, row)| {
            let mut cells = vec![i.to_string()];
            cells.extend(row.iter().map(|v| v.display()));
            cells
        });
        write!(f, "{}", render(header, rows))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Kind, Table, Value};

    #[test]
    fn table_renders_names_and_indices() {
        let t = Table::from_iterable(
            vec![
                vec![Value::Int(1), Value::Null],
                vec![Value::from("x"), Value::from("y")],
            ],
            Some(vec!["n".to_string(), "s".to_string()]),
            Some(vec![Kind::Int, Kind::Str]),
        )
        .unwrap();
        let out = t.to_string();
        assert!(out.contains(" n "));
        assert!(out.contains(" s "));
        assert!(out.contains('0'));
        assert!(out.contains('1'));
        assert!(out.contains('x'));
    }

    #[test]
    fn seq_renders_its_name() {
        let s = crate::model::Seq::new("score", Kind::Int, vec![Value::Int(9)]).unwrap();
        let out = s.to_string();
        assert!(out.contains("score"));
        assert!(out.contains('9'));
    }
}
