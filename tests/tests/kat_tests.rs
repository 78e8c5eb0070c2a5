//! Known-answer suites run through the cipher registry

use blockmode_tests::suites::kat::{load_suite_by_name, suite_names, BlockmodeEngine, Runner};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(name: &str) -> usize {
    init_logging();
    let suite = load_suite_by_name(name).unwrap_or_else(|e| panic!("failed to load {}: {}", name, e));
    let engine = BlockmodeEngine;
    let tally = Runner::new(&engine).run_suite(&suite).expect("known-answer cases failed");
    tally.passed
}

#[test]
fn test_sm4_block_kat() {
    assert_eq!(run("KAT-SM4-1.0"), 6);
}

#[test]
fn test_sm4_ctr_kat() {
    assert_eq!(run("KAT-SM4-CTR-1.0"), 9);
}

#[test]
fn test_sm4_cfb_kat() {
    assert_eq!(run("KAT-SM4-CFB-1.0"), 20);
}

#[test]
fn test_sm4_key_wrap_kat() {
    assert_eq!(run("KAT-SM4-KW-1.0"), 10);
}

#[test]
fn test_sm4_gcm_kat() {
    assert_eq!(run("KAT-SM4-GCM-1.0"), 13);
}

#[test]
fn test_every_suite_is_covered() {
    let names = suite_names().unwrap();
    assert_eq!(
        names,
        [
            "KAT-SM4-1.0",
            "KAT-SM4-CFB-1.0",
            "KAT-SM4-CTR-1.0",
            "KAT-SM4-GCM-1.0",
            "KAT-SM4-KW-1.0",
        ]
    );
}
