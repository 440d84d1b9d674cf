use crate::entities::Panel;

/// A nesting job: the panels to place and the dimensions of the sheet.
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    /// Fabric width in cm
    pub sheet_width: f64,
    /// Maximum usable length in cm
    pub max_length: f64,
    /// Optional minimum marker length in cm, carried through to the solution
    pub min_length: Option<f64>,
    /// One entry per physical copy
    pub panels: Vec<Panel>,
}

impl Instance {
    pub fn total_panel_area(&self) -> f64 {
        self.panels.iter().map(|p| p.area()).sum()
    }
}
