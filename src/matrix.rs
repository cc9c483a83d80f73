//! Labelled value matrices and their conversion to graph input.
//!
//! A matrix is a header row (corner label, then column ids) followed by body
//! rows (row id, then one value per column). Its JSON form is an array of
//! arrays:
//!
//! ```json
//! [["Gene", "Con1", "Con2"],
//!  ["Gene1", 87332, 87643],
//!  ["Gene2", 75643, 79184]]
//! ```
//!
//! Every cell becomes one edge from its row id to its column id, weighted by
//! its share of the matrix total.

use crate::error::MatrixError;
use crate::graph::{EdgeSpec, GraphSpec};
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// One body row of a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    corner: String,
    columns: Vec<String>,
    rows: Vec<MatrixRow>,
}

impl Matrix {
    /// Build a matrix, checking shape and values.
    pub fn new(
        corner: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<MatrixRow>,
    ) -> Result<Self, MatrixError> {
        if columns.is_empty() {
            return Err(MatrixError::NoColumns);
        }
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        for (r, row) in rows.iter().enumerate() {
            if row.values.len() != columns.len() {
                return Err(MatrixError::RaggedRow {
                    row: r + 1,
                    expected: columns.len(),
                    found: row.values.len(),
                });
            }
            for (c, &value) in row.values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidValue {
                        row: r + 1,
                        col: c + 1,
                        value,
                    });
                }
            }
        }
        Ok(Self {
            corner: corner.into(),
            columns,
            rows,
        })
    }

    /// Parse the array-of-arrays JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, MatrixError> {
        let raw: Vec<Vec<Value>> = serde_json::from_str(json)?;
        Self::from_values(&raw)
    }

    pub fn from_values(raw: &[Vec<Value>]) -> Result<Self, MatrixError> {
        let (header, body) = raw.split_first().ok_or(MatrixError::Empty)?;
        let (corner, columns) = header.split_first().ok_or(MatrixError::NoColumns)?;

        let label = |value: &Value, row: usize, col: usize| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(MatrixError::BadLabel { row, col })
        };

        let corner = label(corner, 0, 0)?;
        let columns = columns
            .iter()
            .enumerate()
            .map(|(c, v)| label(v, 0, c + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = body
            .iter()
            .enumerate()
            .map(|(r, cells)| {
                let row = r + 1;
                let (first, rest) = cells.split_first().ok_or(MatrixError::RaggedRow {
                    row,
                    expected: columns.len(),
                    found: 0,
                })?;
                let values = rest
                    .iter()
                    .enumerate()
                    .map(|(c, v)| {
                        v.as_f64()
                            .ok_or(MatrixError::NotANumber { row, col: c + 1 })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MatrixRow {
                    label: label(first, row, 0)?,
                    values,
                })
            })
            .collect::<Result<Vec<_>, MatrixError>>()?;

        Self::new(corner, columns, rows)
    }

    /// The five-gene by four-condition expression sample.
    pub fn sample() -> Self {
        let columns = ["Con1", "Con2", "Treat1", "Treat2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let high = [87332.0, 87643.0, 84969.0, 87234.0];
        let low = [75643.0, 79184.0, 77444.0, 76810.0];
        let rows = (1..=5)
            .map(|i| MatrixRow {
                label: format!("Gene{}", i),
                values: if i % 2 == 1 { high.to_vec() } else { low.to_vec() },
            })
            .collect();

        Self {
            corner: "Gene".to_string(),
            columns,
            rows,
        }
    }

    /// Seeded random matrix for demos.
    pub fn random(seed: u64, rows: usize, cols: usize) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let rows = rows.max(1);
        let cols = cols.max(1);

        let columns = (0..cols).map(|c| format!("Cond{}", c + 1)).collect();
        let rows = (0..rows)
            .map(|r| MatrixRow {
                label: format!("Gene{}", r + 1),
                values: (0..cols).map(|_| rng.gen_range(1_000.0..100_000.0)).collect(),
            })
            .collect();

        Self {
            corner: "Gene".to_string(),
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().flat_map(|r| r.values.iter()).sum()
    }

    /// Convert to graph input with weights normalized to sum to 1.
    ///
    /// Nodes are the row ids followed by the column ids. Edges are emitted in
    /// row-major order with sequential ids starting at `"0"`.
    pub fn to_graph_spec(&self) -> Result<GraphSpec, MatrixError> {
        let total = self.total();
        if total <= 0.0 {
            return Err(MatrixError::ZeroTotal);
        }

        let nodes = self
            .rows
            .iter()
            .map(|r| r.label.clone())
            .chain(self.columns.iter().cloned())
            .collect();

        let edges = self
            .rows
            .iter()
            .flat_map(|row| {
                row.values
                    .iter()
                    .zip(&self.columns)
                    .map(move |(&value, column)| (row.label.as_str(), column.as_str(), value))
            })
            .enumerate()
            .map(|(i, (source, target, value))| {
                EdgeSpec::new(i.to_string(), source, target, value / total)
            })
            .collect();

        Ok(GraphSpec { nodes, edges })
    }

    /// The array-of-arrays JSON form.
    pub fn to_json(&self) -> Value {
        let header = std::iter::once(&self.corner)
            .chain(&self.columns)
            .map(|s| Value::from(s.as_str()))
            .collect::<Vec<_>>();
        let body = self.rows.iter().map(|row| {
            let cells = std::iter::once(Value::from(row.label.as_str()))
                .chain(row.values.iter().map(|&v| Value::from(v)))
                .collect::<Vec<_>>();
            Value::Array(cells)
        });
        Value::Array(std::iter::once(Value::Array(header)).chain(body).collect())
    }
}
