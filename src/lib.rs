//! xlsxext - Serializer for the SpreadsheetML worksheet extension list
//!
//! This crate writes and reads the worksheet-level `<extLst>` element of XLSX
//! files: the Excel 2010 (x14) extension blocks that hold conditional-formatting
//! rules and data validations the legacy schema cannot express (solid-fill data
//! bars, custom icon sets, cross-sheet list validations, ...).
//!
//! Writing is a two-pass operation:
//!
//! 1. `prepare` assigns an extension identifier to every rule that needs the
//!    extended form. Once a rule has an identifier it keeps it.
//! 2. `render` emits the extension list. Blocks with nothing to say are
//!    omitted, and an empty model produces no output at all.
//!
//! The same identifier must be referenced from the legacy `<cfRule>` element;
//! `render_rule_link` produces that reference block.
//!
//! # Quick Start
//!
//! ```rust
//! use xlsxext::{CfRule, ConditionalFormatting, ExtLstModel, ExtLstSerializerBuilder, IconSet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let serializer = ExtLstSerializerBuilder::new().build()?;
//!
//!     let mut model = ExtLstModel::new();
//!     model.conditional_formattings.push(ConditionalFormatting::new(
//!         "B2:B20",
//!         vec![CfRule::with_icon_set(IconSet::named("3Stars")).priority(1)],
//!     ));
//!
//!     // Assign identifiers, then render
//!     serializer.prepare(&mut model);
//!     let xml = serializer.render_to_string(&model)?;
//!     assert!(xml.contains(r#"<x14:iconSet iconSet="3Stars"/>"#));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Reading a Worksheet
//!
//! ```rust
//! use xlsxext::ExtLstSerializerBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let serializer = ExtLstSerializerBuilder::new().build()?;
//! let sheet = r#"<worksheet><sheetData/><extLst>
//!   <ext uri="{CCE6A557-97BC-4b89-ADB6-D9C93CAAB3DF}">
//!     <x14:dataValidations count="1">
//!       <x14:dataValidation type="list">
//!         <x14:formula1><xm:f>Lists!$A$1:$A$3</xm:f></x14:formula1>
//!         <xm:sqref>C1:C9</xm:sqref>
//!       </x14:dataValidation>
//!     </x14:dataValidations>
//!   </ext>
//! </extLst></worksheet>"#;
//!
//! let model = serializer.parse_worksheet_str(sheet)?;
//! assert_eq!(model.data_validations[0].sqref, "C1:C9");
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust
//! use xlsxext::{ExtLstSerializerBuilder, IdStrategy, OutputStyle};
//!
//! # fn main() -> Result<(), xlsxext::XlsxExtError> {
//! let serializer = ExtLstSerializerBuilder::new()
//!     .with_id_strategy(IdStrategy::Sequential)  // deterministic identifiers
//!     .with_output_style(OutputStyle::Indented { width: 2 })
//!     .with_max_depth(32)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod id;
mod security;
mod types;
mod xform;
mod xml;

// 公開API
pub use api::{IdStrategy, OutputStyle};
pub use builder::{ExtLstSerializer, ExtLstSerializerBuilder};
pub use error::XlsxExtError;
pub use types::{
    AxisPosition, CfIcon, CfRule, CfRuleType, Cfvo, CfvoType, Color, ConditionalFormatting,
    DataBar, DataBarDirection, DataValidation, Dxf, DxfFill, DxfFont, ExtLstModel, IconSet,
    NumFmt, DEFAULT_ICON_SET,
};
