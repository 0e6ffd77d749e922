use crate::{Float, Setup};
use anyhow::Result;
use itertools::Itertools;

const PI: Float = std::f64::consts::PI as Float;

/// Physical edge length of the periodic box, fixed for this benchmark
/// family.
pub const DOMAIN_SIZE: Float = 200.0;

/// Period coefficients of the CHiMaD 2023 preset.
pub const CHIMAD_2023_PERIODS: [i32; 10] = [3, 4, 8, 6, 1, 5, 2, 1, 0, 0];

/// The spinodal-decomposition problem family. Each variant is a pure
/// function of position producing the initial order parameter, plus a name
/// used for output files. Dispatch is resolved at construction; there is
/// exactly one level of specialization, so a closed enum replaces the
/// original class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// The published benchmark initial condition.
    Benchmark,
    /// Infinitely differentiable variant with caller-chosen periods.
    /// The first eight coefficients set cosine periods, the last two set
    /// sine periods; a sine coefficient of 0 eliminates that term.
    Custom([i32; 10]),
    /// The periodic preset proposed at the August 2023 CHiMaD meeting.
    ChiMaD2023,
}

impl Variant {
    pub fn from_setup(setup: &Setup) -> Result<Variant> {
        match setup.variant.as_str() {
            "benchmark" => Ok(Variant::Benchmark),
            "chimad2023" => Ok(Variant::ChiMaD2023),
            "custom" => match setup.periods {
                Some(periods) => Ok(Variant::Custom(periods)),
                None => Err(anyhow::Error::msg(
                    "The custom variant requires ten period coefficients",
                )),
            },
            other => Err(anyhow::Error::msg(format!(
                "Unknown problem variant `{}`",
                other
            ))),
        }
    }

    /// Initial order-parameter value at the physical position (x, y).
    pub fn initial_condition(&self, x: Float, y: Float) -> Float {
        match self {
            Variant::Benchmark => {
                0.5 + 0.01
                    * ((0.105 * x).cos() * (0.11 * y).cos()
                        + ((0.13 * x).cos() * (0.087 * y).cos()).powi(2)
                        + (0.025 * x - 0.15 * y).cos() * (0.07 * x - 0.02 * y).cos())
            }
            Variant::Custom(periods) => {
                let [n1, n2, n3, n4, n5, n6, n7, n8, n9, n10] =
                    periods.map(|v| v as Float);
                0.5 + 0.01
                    * ((n1 * PI * x / 100.).cos() * (n2 * PI * y / 100.).cos()
                        + ((n3 * PI * x / 200.).cos() * (n4 * PI * y / 200.).cos()).powi(2)
                        + (n5 * PI * x / 100. - n6 * PI * y / 100.).cos()
                            * (n7 * PI * x / 100. - n8 * PI * y / 100.).cos()
                        + (n9 * PI * x / 100.).sin()
                        + (n10 * PI * y / 100.).sin())
            }
            Variant::ChiMaD2023 => {
                Variant::Custom(CHIMAD_2023_PERIODS).initial_condition(x, y)
            }
        }
    }

    /// Human-readable name used for output file naming.
    pub fn name(&self) -> String {
        match self {
            Variant::Benchmark => "benchmark".to_string(),
            Variant::Custom(periods) => {
                format!("custom_{}", periods.iter().join("_"))
            }
            Variant::ChiMaD2023 => "chimad2023".to_string(),
        }
    }
}
