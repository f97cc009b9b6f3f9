//! Security Tests
//!
//! 解析時の制限（入力サイズ、ネスト深さ）とDOCTYPE宣言（XXE攻撃）への対策を検証します。

use xlsxext::{ExtLstSerializerBuilder, XlsxExtError};

/// XXE攻撃のテスト: DOCTYPE宣言を含む入力は拒否される
#[test]
fn test_doctype_rejected() {
    let xml = concat!(
        r#"<?xml version="1.0"?>"#,
        r#"<!DOCTYPE extLst [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>"#,
        r#"<extLst><ext uri="{CCE6A557-97BC-4b89-ADB6-D9C93CAAB3DF}"><x14:dataValidations count="1">"#,
        r#"<x14:dataValidation prompt="&xxe;"><xm:sqref>A1</xm:sqref></x14:dataValidation>"#,
        r#"</x14:dataValidations></ext></extLst>"#
    );

    let serializer = ExtLstSerializerBuilder::new().build().unwrap();
    match serializer.parse_str(xml) {
        Err(XlsxExtError::SecurityViolation(msg)) => assert!(msg.contains("DOCTYPE")),
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

/// DOCTYPE宣言はワークシート全体の読み込みでも拒否される
#[test]
fn test_doctype_rejected_in_worksheet() {
    let xml = r#"<!DOCTYPE worksheet [<!ENTITY a "aaaa">]><worksheet/>"#;
    let serializer = ExtLstSerializerBuilder::new().build().unwrap();
    assert!(matches!(
        serializer.parse_worksheet_str(xml),
        Err(XlsxExtError::SecurityViolation(_))
    ));
}

/// ネスト深さの上限を超える入力は拒否される
#[test]
fn test_nesting_too_deep() {
    let depth = 100;
    let mut xml = String::from(r#"<extLst><ext uri="{78C0D931-6437-407d-A8EE-F0AAD7539E65}">"#);
    for _ in 0..depth {
        xml.push_str("<x>");
    }
    for _ in 0..depth {
        xml.push_str("</x>");
    }
    xml.push_str("</ext></extLst>");

    let serializer = ExtLstSerializerBuilder::new().build().unwrap();
    match serializer.parse_str(&xml) {
        Err(XlsxExtError::SecurityViolation(msg)) => assert!(msg.contains("nested too deeply")),
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

/// ネスト深さの上限は設定で変更できる
#[test]
fn test_custom_max_depth() {
    let xml = concat!(
        r#"<extLst><ext uri="{78C0D931-6437-407d-A8EE-F0AAD7539E65}"><x14:conditionalFormattings>"#,
        r#"<x14:conditionalFormatting><xm:sqref>A1</xm:sqref></x14:conditionalFormatting>"#,
        r#"</x14:conditionalFormattings></ext></extLst>"#
    );

    let strict = ExtLstSerializerBuilder::new().with_max_depth(4).build().unwrap();
    assert!(matches!(
        strict.parse_str(xml),
        Err(XlsxExtError::SecurityViolation(_))
    ));

    let relaxed = ExtLstSerializerBuilder::new().with_max_depth(5).build().unwrap();
    let model = relaxed.parse_str(xml).unwrap();
    assert_eq!(model.conditional_formattings[0].sqref, "A1");
}

/// 入力サイズの上限を超える入力は拒否される
#[test]
fn test_input_too_large() {
    let serializer = ExtLstSerializerBuilder::new()
        .with_max_input_size(1024)
        .build()
        .unwrap();

    let mut xml = String::from("<worksheet><sheetData>");
    while xml.len() <= 1024 {
        xml.push_str(r#"<row r="1"><c r="A1"><v>1</v></c></row>"#);
    }
    xml.push_str("</sheetData></worksheet>");

    assert!(matches!(
        serializer.parse_worksheet_str(&xml),
        Err(XlsxExtError::SecurityViolation(_))
    ));
    assert!(matches!(
        serializer.parse(xml.as_bytes()),
        Err(XlsxExtError::SecurityViolation(_))
    ));
}

/// 不正なUTF-8は変換エラーになる
#[test]
fn test_invalid_utf8_input() {
    let serializer = ExtLstSerializerBuilder::new().build().unwrap();
    let bytes: &[u8] = b"<extLst>\xff\xfe</extLst>";
    assert!(matches!(
        serializer.parse(bytes),
        Err(XlsxExtError::Utf8(_))
    ));
}
