//! End-to-end tests through the public API

use abbrevcheck::{
    AbbreviationResolver, MappingTable, ProcessInterpreter, ResolutionOutcome,
};
use anyhow::Result;
use std::fs;

#[test]
fn test_verify_with_closure_interpreter() -> Result<()> {
    let table = MappingTable::from_pairs(vec![
        ("br s", "breakpoint set"),
        ("di", "disassemble"),
        ("dis", "disassemble"),
    ])?;

    let interpreter = |text: &str| -> Result<String> {
        Ok(match text {
            "br s" => "breakpoint set".to_string(),
            "di" | "dis" => "disassemble".to_string(),
            other => anyhow::bail!("'{}' is not a valid command", other),
        })
    };

    let report = AbbreviationResolver::new().verify(&interpreter, &table);
    assert!(report.passed);
    assert_eq!(report.len(), 3);
    Ok(())
}

#[test]
fn test_verify_with_process_interpreter() -> Result<()> {
    let table = MappingTable::from_pairs(vec![
        ("br s", "breakpoint set"),
        ("di", "disassemble"),
        ("w", "watchpoint"),
    ])?;

    // A shell case statement standing in for a real interpreter's
    // abbreviation expansion; "w" is deliberately unknown
    let resolver = concat!(
        r#"case {} in "#,
        r#""br s") echo "breakpoint set";; "#,
        r#"di|dis) echo disassemble;; "#,
        r#"*) exit 1;; esac"#,
    );
    let interpreter = ProcessInterpreter::new(resolver);

    let report = AbbreviationResolver::new().verify(&interpreter, &table);
    assert!(!report.passed);
    assert_eq!(report.len(), 3);
    assert_eq!(report.entries[0].outcome, ResolutionOutcome::Matched);
    assert_eq!(report.entries[1].outcome, ResolutionOutcome::Matched);
    assert!(matches!(
        report.entries[2].outcome,
        ResolutionOutcome::ResolutionFailed { .. }
    ));
    Ok(())
}

#[test]
fn test_verify_table_loaded_from_file() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("abbrevcheck_e2e_{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("spellings.txt");
    fs::write(
        &path,
        "# lldb common short spellings\n\
         \"br s\" => breakpoint set\n\
         disp => _regexp-display\n\
         di => disassemble\n",
    )?;

    let table = MappingTable::load(&path)?;
    assert_eq!(table.len(), 3);

    // `echo` is an identity resolver, so only entries whose abbreviation
    // equals its canonical form would match
    let interpreter = ProcessInterpreter::new("echo {}");
    let report = AbbreviationResolver::new().verify(&interpreter, &table);
    assert!(!report.passed);
    assert_eq!(
        report.entries[2].outcome,
        ResolutionOutcome::Mismatched {
            got: "di".to_string()
        }
    );

    let summary = report.summarize();
    assert!(summary.contains("3 of 3"));

    fs::remove_dir_all(&dir).ok();
    Ok(())
}
