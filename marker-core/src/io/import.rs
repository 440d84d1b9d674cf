use anyhow::{Result, ensure};
use itertools::Itertools;
use log::{info, warn};

use crate::entities::{Instance, LANE_A_SUFFIX, Panel};
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtInstance, ExtPanel, ExtSPolygon, LengthUnit};

/// Converts external representations of instances and panels into internal ones.
#[derive(Clone, Debug)]
pub struct Importer {
    /// Styles ending with this suffix are assigned to [`Lane::A`](crate::entities::Lane::A)
    pub lane_a_suffix: String,
}

impl Importer {
    pub fn new(lane_a_suffix: impl Into<String>) -> Importer {
        Importer {
            lane_a_suffix: lane_a_suffix.into(),
        }
    }

    /// Scales the panels to centimeters and expands every panel entry into its marker quantity.
    pub fn import_instance(&self, ext_instance: &ExtInstance) -> Result<Instance> {
        let ext_sheet = &ext_instance.sheet;
        let sheet_width = ext_sheet.width * ext_sheet.width_unit.to_cm();
        ensure!(
            sheet_width > 0.0,
            "sheet width must be positive, got {}",
            ext_sheet.width
        );
        ensure!(
            ext_sheet.max_length > 0.0,
            "sheet max length must be positive, got {}",
            ext_sheet.max_length
        );
        ensure!(ext_instance.layers > 0, "number of layers must be positive");

        let panels = ext_instance
            .panels
            .iter()
            .flat_map(|ext_panel| {
                self.import_panels(ext_panel, ext_instance.unit, ext_instance.layers)
            })
            .collect_vec();

        if panels.is_empty() {
            warn!("instance {} contains no panels", ext_instance.name);
        }
        info!(
            "[IMPORT] instance {}: {} panels on a {:.1} cm wide sheet (max length {:.1} cm)",
            ext_instance.name,
            panels.len(),
            sheet_width,
            ext_sheet.max_length
        );

        Ok(Instance {
            name: ext_instance.name.clone(),
            sheet_width,
            max_length: ext_sheet.max_length,
            min_length: ext_sheet.min_length,
            panels,
        })
    }

    /// One [`Panel`] per copy that has to be laid out, `ceil(quantity / layers)` in total.
    pub fn import_panels(
        &self,
        ext_panel: &ExtPanel,
        unit: LengthUnit,
        layers: usize,
    ) -> Vec<Panel> {
        let outline = import_outline(&ext_panel.shape, unit);
        let n_copies = marker_quantity(ext_panel.quantity, layers);
        (0..n_copies)
            .map(|_| {
                Panel::new(
                    ext_panel.id.clone(),
                    ext_panel.style.clone(),
                    outline.clone(),
                    &self.lane_a_suffix,
                )
            })
            .collect_vec()
    }
}

impl Default for Importer {
    fn default() -> Self {
        Importer::new(LANE_A_SUFFIX)
    }
}

/// Number of copies on the marker when `quantity` pieces are cut from `layers` stacked plies
pub fn marker_quantity(quantity: usize, layers: usize) -> usize {
    quantity.div_ceil(layers)
}

pub fn import_outline(ext_shape: &ExtSPolygon, unit: LengthUnit) -> Vec<Point> {
    let factor = unit.to_cm();
    ext_shape
        .0
        .iter()
        .map(|&(x, y)| Point(x * factor, y * factor))
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Lane, PanelId};
    use crate::io::ext_repr::ExtSheet;
    use float_cmp::approx_eq;

    fn ext_instance(unit: LengthUnit, width_unit: LengthUnit, layers: usize) -> ExtInstance {
        ExtInstance {
            name: "test".to_string(),
            unit,
            sheet: ExtSheet {
                width: 60.0,
                width_unit,
                max_length: 500.0,
                min_length: None,
            },
            layers,
            panels: vec![
                ExtPanel {
                    id: PanelId::Int(1),
                    style: "FRONT_A".to_string(),
                    shape: ExtSPolygon(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)]),
                    quantity: 5,
                },
                ExtPanel {
                    id: PanelId::Str("sleeve".to_string()),
                    style: "SLEEVE_B".to_string(),
                    shape: ExtSPolygon(vec![(0.0, 0.0), (20.0, 0.0), (10.0, 30.0)]),
                    quantity: 0,
                },
            ],
        }
    }

    #[test]
    fn quantities_are_divided_over_layers() {
        assert_eq!(marker_quantity(5, 2), 3);
        assert_eq!(marker_quantity(4, 2), 2);
        assert_eq!(marker_quantity(0, 3), 0);
        assert_eq!(marker_quantity(1, 4), 1);
    }

    #[test]
    fn units_are_converted_to_cm() {
        let ext = ext_instance(LengthUnit::Mm, LengthUnit::Inch, 2);
        let instance = Importer::default().import_instance(&ext).unwrap();

        assert!(approx_eq!(f64, instance.sheet_width, 60.0 * 2.54));
        assert_eq!(instance.panels.len(), 3);
        let panel = &instance.panels[0];
        assert_eq!(panel.lane, Lane::A);
        assert!(approx_eq!(f64, panel.area(), 10.0 * 5.0, epsilon = 1e-9));
    }

    #[test]
    fn invalid_sheet_is_rejected() {
        let mut ext = ext_instance(LengthUnit::Cm, LengthUnit::Cm, 1);
        ext.sheet.width = 0.0;
        assert!(Importer::default().import_instance(&ext).is_err());

        let ext = ext_instance(LengthUnit::Cm, LengthUnit::Cm, 0);
        assert!(Importer::default().import_instance(&ext).is_err());
    }
}
