//! Per-type interaction coefficients
//!
//! `InteractionMatrix` is a square `type_count x type_count` table stored
//! row-major. `get(a, b)` is the coefficient particle type `a` uses when it
//! computes its force toward type `b`. The table is deliberately not
//! required to be symmetric: an asymmetric pair makes one type chase another.

use crate::configuration::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    size: usize,
    data: Vec<f64>,
}

impl InteractionMatrix {
    /// Build from nested rows, rejecting ragged or empty input
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ConfigError> {
        let size = rows.len();
        if size == 0 {
            return Err(ConfigError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ConfigError::RaggedMatrix {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self { size, data })
    }

    /// A matrix where every pair uses the same coefficient
    pub fn uniform(size: usize, value: f64) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient applied when type `a` computes force toward type `b`
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.data[a * self.size + b]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|a| (a + 1..self.size).all(|b| self.get(a, b) == self.get(b, a)))
    }
}
