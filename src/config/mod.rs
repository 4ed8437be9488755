//! Configuration for the dataset generator.

/// Mean and standard deviation of a normally distributed column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalParams {
    /// Distribution mean
    pub mean: f64,
    /// Distribution standard deviation
    pub std_dev: f64,
    /// Decimal places the generated value is rounded to
    pub decimals: u32,
}

impl NormalParams {
    /// Create distribution parameters
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64, decimals: u32) -> Self {
        Self {
            mean,
            std_dev,
            decimals,
        }
    }
}

/// Configuration for synthetic patient generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of patients to generate
    pub n_patients: usize,
    /// RNG seed; the same seed and count reproduce the same dataset
    pub seed: u64,
    /// Per-column probability that a cell is blanked out
    pub missing_rate: f64,
    /// Age range in years, half-open
    pub age_range: (i32, i32),
    /// Weight distribution (kg)
    pub weight: NormalParams,
    /// Height distribution (cm)
    pub height: NormalParams,
    /// Systolic blood pressure distribution (mmHg)
    pub systolic_bp: NormalParams,
    /// Diastolic blood pressure distribution (mmHg)
    pub diastolic_bp: NormalParams,
    /// Cholesterol distribution (mg/dL)
    pub cholesterol: NormalParams,
    /// Glucose distribution (mg/dL)
    pub glucose: NormalParams,
    /// Sampling weights for outcome labels 1 through 5
    pub label_weights: [f64; 5],
}

impl GeneratorConfig {
    /// Configuration with the reference distributions and a given size and seed
    #[must_use]
    pub fn with_size(n_patients: usize, seed: u64) -> Self {
        Self {
            n_patients,
            seed,
            ..Self::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_patients: 100,
            seed: 7,
            missing_rate: 0.01,
            age_range: (20, 80),
            weight: NormalParams::new(70.0, 15.0, 1),
            height: NormalParams::new(170.0, 10.0, 0),
            systolic_bp: NormalParams::new(120.0, 20.0, 0),
            diastolic_bp: NormalParams::new(80.0, 10.0, 0),
            cholesterol: NormalParams::new(200.0, 40.0, 0),
            glucose: NormalParams::new(100.0, 25.0, 0),
            label_weights: [0.30, 0.25, 0.20, 0.15, 0.10],
        }
    }
}
