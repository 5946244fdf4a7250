//! End-to-end renderings of a small parse tree ("mi klama le zarci") across modes

use camxes_postproc::postproc::{postprocess, prettify_brackets};

const MI_KLAMA_LE_ZARCI: &str = r#"["text",["sentence",["sumti",["KOhA","mi"],["spaces"," "]],["selbri",["gismu",["k","k"],["l","l"],["a","a"],["m","m"],["a","a"]],["spaces"," "]],["sumti",["LE","le"],["spaces"," "],["gismu","zarci"],["KU"]]]]"#;

fn render(mode: &str) -> String {
    postprocess(MI_KLAMA_LE_ZARCI, mode).expect("sample tree to postprocess")
}

#[test]
fn test_default_mode() {
    insta::assert_snapshot!(render(""), @"(mi klama [le zarci])");
}

#[test]
fn test_show_spaces() {
    insta::assert_snapshot!(render("S"), @"([mi _] [klama _] [le _ zarci])");
}

#[test]
fn test_show_terminators() {
    insta::assert_snapshot!(render("T"), @"(mi klama [le zarci KU])");
}

#[test]
fn test_show_selmaho() {
    insta::assert_snapshot!(render("C"), @"(KOhA:mi G:klama [LE:le G:zarci])");
}

#[test]
fn test_show_node_labels() {
    insta::assert_snapshot!(
        render("N"),
        @"(BRIDI SUMTI:mi SELBRI:klama [SUMTI le zarci])"
    );
}

#[test]
fn test_selmaho_and_node_labels() {
    insta::assert_snapshot!(
        render("CN"),
        @"(BRIDI: [SUMTI: KOhA:mi] [SELBRI: G:klama] [SUMTI LE:le G:zarci])"
    );
}

#[test]
fn test_raw_with_selmaho() {
    insta::assert_snapshot!(
        render("CR"),
        @"(text: [sentence {sumti: KOhA:mi} {selbri: gismu:klama} {sumti LE:le gismu:zarci}])"
    );
}

#[test]
fn test_keep_morphology() {
    insta::assert_snapshot!(render("M"), @"(mi [k l a m a] [le zarci])");
}

#[test]
fn test_raw_json() {
    insta::assert_snapshot!(
        render("RJ"),
        @r#"["text",["sentence",["sumti",["KOhA","mi"]],["selbri",["gismu","klama"]],["sumti",["LE","le"],["gismu","zarci"]]]]"#
    );
}

#[test]
fn test_single_word_sentence() {
    let tree = r#"["text",["sentence",["selbri",[["gismu","klama"]]]]]"#;
    assert_eq!(postprocess(tree, "").unwrap(), "klama");
    assert_eq!(postprocess(tree, "N").unwrap(), "(BRIDI: SELBRI:klama)");
}

#[test]
fn test_deep_nesting_is_numbered() {
    insta::assert_snapshot!(prettify_brackets("[[[[[a]]]]]"), @"([{<¹(a)¹>}])");
}
