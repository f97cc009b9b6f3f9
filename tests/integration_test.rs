//! Integration Tests for xlsxext
//!
//! 公開APIを通した書き出し・読み込みの一連の流れと、
//! rust_xlsxwriterが生成したワークシートとの相互運用性を検証します。

use rust_xlsxwriter::*;
use std::io::{Cursor, Read};
use xlsxext::{
    CfIcon, CfRule, CfRuleType, Cfvo, CfvoType, Color, ConditionalFormatting, DataBar,
    DataBarDirection, DataValidation, Dxf, DxfFill, DxfFont, ExtLstModel, ExtLstSerializer,
    ExtLstSerializerBuilder, IconSet, IdStrategy,
};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Generate a workbook whose first sheet has a solid-fill data bar
    pub fn generate_solid_data_bar() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for row in 0..10 {
            worksheet.write_number(row, 0, f64::from(row + 1))?;
        }

        let data_bar = ConditionalFormatDataBar::new().set_solid_fill(true);
        worksheet.add_conditional_format(0, 0, 9, 0, &data_bar)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Extract a part of the package as a string
    pub fn read_part(xlsx: Vec<u8>, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }
}

fn serializer() -> ExtLstSerializer {
    ExtLstSerializerBuilder::new()
        .with_id_strategy(IdStrategy::Sequential)
        .build()
        .unwrap()
}

fn workbook_model() -> ExtLstModel {
    let solid_bar = DataBar {
        gradient: false,
        border: true,
        direction: DataBarDirection::LeftToRight,
        cfvo: vec![Cfvo::new(CfvoType::AutoMin), Cfvo::new(CfvoType::AutoMax)],
        fill_color: Some(Color::rgb("FF638EC6")),
        border_color: Some(Color::rgb("FF638EC6")),
        negative_fill_color: Some(Color::rgb("FFFF0000")),
        axis_color: Some(Color::rgb("FF000000")),
        ..DataBar::default()
    };

    let custom_icons = IconSet {
        name: "3Arrows".to_string(),
        custom: true,
        cfvo: vec![
            Cfvo::with_value(CfvoType::Percent, "0"),
            Cfvo::with_value(CfvoType::Percent, "33"),
            Cfvo::with_value(CfvoType::Percent, "67"),
        ],
        icons: vec![
            CfIcon {
                icon_set: "3Flags".to_string(),
                icon_id: 0,
            },
            CfIcon {
                icon_set: "3Symbols2".to_string(),
                icon_id: 1,
            },
            CfIcon {
                icon_set: "3Stars".to_string(),
                icon_id: 2,
            },
        ],
        ..IconSet::default()
    };

    let highlight = Dxf {
        font: Some(DxfFont {
            bold: Some(true),
            color: Some(Color::rgb("FF9C0006")),
            ..DxfFont::default()
        }),
        fill: Some(DxfFill {
            bg_color: Some(Color::rgb("FFFFC7CE")),
            ..DxfFill::default()
        }),
        ..Dxf::default()
    };

    ExtLstModel {
        conditional_formattings: vec![
            ConditionalFormatting::new(
                "A1:A10",
                vec![CfRule::with_data_bar(solid_bar).priority(1)],
            ),
            ConditionalFormatting::new(
                "B1:B10",
                vec![
                    CfRule::with_icon_set(custom_icons).priority(2),
                    CfRule::with_formulae(["B1>100"]).priority(3),
                ],
            ),
            // 他シート参照の数式は拡張形式として読み込まれたルールを想定
            ConditionalFormatting::new(
                "C1:C10",
                vec![CfRule::with_formulae(["C1>Limits!$A$1", "C1<Limits!$B$1"])
                    .priority(4)
                    .extension_id("{6E1F3A2B-0000-4000-8000-0000000000AA}")
                    .style(highlight)],
            ),
        ],
        data_validations: vec![DataValidation {
            sqref: "D2:D50".to_string(),
            validation_type: Some("list".to_string()),
            allow_blank: true,
            show_input_message: true,
            show_error_message: true,
            error_title: Some("Invalid".to_string()),
            error: Some("Pick a value from the list".to_string()),
            formula1: Some("Lists!$A$1:$A$8".to_string()),
            ..DataValidation::default()
        }],
    }
}

#[test]
fn test_full_workflow() {
    let serializer = serializer();
    let mut model = workbook_model();

    let mut output = Vec::new();
    serializer.write(&mut model, &mut output).unwrap();
    let xml = String::from_utf8(output).unwrap();

    // 拡張形式が必要なルールのみ識別子を持つ
    let rules: Vec<&CfRule> = model
        .conditional_formattings
        .iter()
        .flat_map(|cf| &cf.rules)
        .collect();
    assert!(rules[0].extension_id.is_some());
    assert!(rules[1].extension_id.is_some());
    assert!(rules[2].extension_id.is_none());
    assert_eq!(
        rules[3].extension_id.as_deref(),
        Some("{6E1F3A2B-0000-4000-8000-0000000000AA}")
    );

    // extLstは一つ、拡張ブロックは二つ（条件付き書式、入力規則の順）
    assert!(xml.starts_with("<extLst>"));
    assert!(xml.ends_with("</extLst>"));
    assert_eq!(xml.matches("<ext ").count(), 2);
    let cf = xml.find("{78C0D931-6437-407d-A8EE-F0AAD7539E65}").unwrap();
    let dv = xml.find("{CCE6A557-97BC-4b89-ADB6-D9C93CAAB3DF}").unwrap();
    assert!(cf < dv);

    // 拡張形式が不要なルールは出力されない
    assert!(!xml.contains("B1&gt;100"));
    assert_eq!(xml.matches("<x14:cfRule ").count(), 3);

    // 数式の順序と書式の位置
    let first = xml.find("<xm:f>C1&gt;Limits!$A$1</xm:f>").unwrap();
    let second = xml.find("<xm:f>C1&lt;Limits!$B$1</xm:f>").unwrap();
    let dxf = xml.find("<x14:dxf>").unwrap();
    assert!(first < second && second < dxf);
}

#[test]
fn test_round_trip_through_text() {
    let serializer = serializer();
    let mut model = workbook_model();
    serializer.prepare(&mut model);

    let xml = serializer.render_to_string(&model).unwrap();
    let parsed = serializer.parse_str(&xml).unwrap();

    assert_eq!(parsed.data_validations, model.data_validations);
    assert_eq!(parsed.conditional_formattings.len(), 3);

    // データバーのルールは優先度を出力しない
    let bar = &parsed.conditional_formattings[0].rules[0];
    assert_eq!(bar.rule_type, CfRuleType::DataBar);
    assert_eq!(bar.priority, None);
    assert_eq!(bar.data_bar, model.conditional_formattings[0].rules[0].data_bar);

    // 拡張形式が不要なルールは読み込み結果に含まれない
    let icons = &parsed.conditional_formattings[1].rules;
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0], model.conditional_formattings[1].rules[0]);

    assert_eq!(
        parsed.conditional_formattings[2],
        model.conditional_formattings[2]
    );
}

#[test]
fn test_prepare_twice_keeps_identifiers() {
    let serializer = serializer();
    let mut model = workbook_model();

    serializer.prepare(&mut model);
    let first = serializer.render_to_string(&model).unwrap();
    serializer.prepare(&mut model);
    let second = serializer.render_to_string(&model).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parsed_rules_stay_extended() {
    // 一度拡張形式になったルールは、設定を既定値に戻しても拡張形式のまま
    let serializer = serializer();
    let mut model = workbook_model();
    serializer.prepare(&mut model);

    let xml = serializer.render_to_string(&model).unwrap();
    let mut parsed = serializer.parse_str(&xml).unwrap();
    let rule = &mut parsed.conditional_formattings[0].rules[0];
    rule.data_bar = Some(DataBar::default());
    assert!(rule.needs_extension());

    let again = serializer.render_to_string(&parsed).unwrap();
    assert!(again.contains(rule_id(&parsed)));
}

fn rule_id(model: &ExtLstModel) -> &str {
    model.conditional_formattings[0].rules[0]
        .extension_id
        .as_deref()
        .unwrap()
}

#[test]
fn test_rule_link_matches_extension() {
    let serializer = serializer();
    let mut model = workbook_model();
    serializer.prepare(&mut model);

    let ext_lst = serializer.render_to_string(&model).unwrap();
    for rule in model.conditional_formattings.iter().flat_map(|cf| &cf.rules) {
        let link = serializer.render_rule_link(rule).unwrap();
        match &rule.extension_id {
            Some(id) => {
                assert_eq!(serializer.parse_rule_link(&link).unwrap().as_ref(), Some(id));
                assert!(ext_lst.contains(id.as_str()));
            }
            None => assert!(link.is_empty()),
        }
    }
}

#[test]
fn test_parse_worksheet_without_extensions() {
    let sheet = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>"#,
        r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        r#"</worksheet>"#
    );
    let model = serializer().parse_worksheet_str(sheet).unwrap();
    assert_eq!(model, ExtLstModel::new());
}

#[test]
fn test_read_rust_xlsxwriter_data_bar() {
    let xlsx = fixtures::generate_solid_data_bar().unwrap();
    let sheet = fixtures::read_part(xlsx, "xl/worksheets/sheet1.xml");

    let model = serializer().parse_worksheet_str(&sheet).unwrap();
    assert!(!model.conditional_formattings.is_empty());

    let formatting = &model.conditional_formattings[0];
    assert_eq!(formatting.sqref, "A1:A10");

    let rule = &formatting.rules[0];
    assert_eq!(rule.rule_type, CfRuleType::DataBar);
    assert!(rule.extension_id.as_deref().unwrap().starts_with('{'));

    let data_bar = rule.data_bar.as_ref().unwrap();
    assert!(!data_bar.gradient);
    assert!(rule.needs_extension());
}

#[test]
fn test_rewrite_rust_xlsxwriter_extension() {
    // 読み込んだ拡張リストを書き直しても識別子は変わらない
    let xlsx = fixtures::generate_solid_data_bar().unwrap();
    let sheet = fixtures::read_part(xlsx, "xl/worksheets/sheet1.xml");

    let serializer = serializer();
    let mut model = serializer.parse_worksheet_str(&sheet).unwrap();
    let id = rule_id(&model).to_string();

    serializer.prepare(&mut model);
    assert_eq!(rule_id(&model), id);

    let xml = serializer.render_to_string(&model).unwrap();
    assert!(xml.contains(&format!(r#"<x14:cfRule type="dataBar" id="{}">"#, id)));
}
