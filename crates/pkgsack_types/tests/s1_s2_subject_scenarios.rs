//! End-to-end subject-parsing scenarios, independent of any sack.

use pkgsack_types::subject::{Subject, SubjectForm};

/// S1 — NEVRA parse enumeration.
#[test]
fn s1_nevra_parse_enumeration() {
    let subject = Subject::new("four-of-fish-8:3.6.9-11.fc100.x86_64");
    let candidates: Vec<_> = subject.candidates().collect();

    assert_eq!(candidates[0].form, SubjectForm::Nevra);
    assert_eq!(candidates[0].name, "four-of-fish");
    assert_eq!(candidates[0].epoch, Some(8));
    assert_eq!(candidates[0].version.as_deref(), Some("3.6.9"));
    assert_eq!(candidates[0].release.as_deref(), Some("11.fc100"));
    assert_eq!(candidates[0].arch.as_deref(), Some("x86_64"));

    assert_eq!(candidates[1].form, SubjectForm::Nevr);
    assert_eq!(candidates[1].name, "four-of-fish");
    assert_eq!(candidates[1].epoch, Some(8));
    assert_eq!(candidates[1].version.as_deref(), Some("3.6.9"));
    assert_eq!(candidates[1].release.as_deref(), Some("11.fc100.x86_64"));
}

/// S2 — NEVR with no epoch: epochless candidates carry `epoch=None`
/// (absent), never `Some(0)`.
#[test]
fn s2_nevr_with_no_epoch() {
    let subject = Subject::new("four-of-fish-3.6.9-11.fc100.x86_64");
    let candidates: Vec<_> = subject.candidates().collect();
    let forms: Vec<_> = candidates.iter().map(|c| c.form).collect();
    assert_eq!(
        forms,
        vec![SubjectForm::Nevra, SubjectForm::Nevr, SubjectForm::Nev, SubjectForm::Na, SubjectForm::Name]
    );
    for c in &candidates[..3] {
        assert_eq!(c.epoch, None, "epochless candidates must be absent, not 0");
    }
    assert_eq!(candidates[1].release.as_deref(), Some("11.fc100.x86_64"));
}
