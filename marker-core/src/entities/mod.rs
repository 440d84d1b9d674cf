mod instance;
mod oriented_shape;
mod panel;
mod placement;
mod run_result;
mod sheet;

#[doc(inline)]
pub use instance::Instance;
#[doc(inline)]
pub use oriented_shape::OrientedShape;
#[doc(inline)]
pub use panel::LANE_A_SUFFIX;
#[doc(inline)]
pub use panel::Lane;
#[doc(inline)]
pub use panel::Panel;
#[doc(inline)]
pub use panel::PanelId;
#[doc(inline)]
pub use placement::Placement;
#[doc(inline)]
pub use run_result::PlacedPanel;
#[doc(inline)]
pub use run_result::RunResult;
#[doc(inline)]
pub use run_result::RunStatus;
#[doc(inline)]
pub use run_result::UnplacedPanel;
#[doc(inline)]
pub use run_result::UnplacedReason;
#[doc(inline)]
pub use sheet::Sheet;
