//! Free-form subject parsing: splitting a user string such as
//! `four-of-fish-8:3.6.9-11.fc100.x86_64` into the ambiguous set of
//! possible NEVRA decompositions (spec.md §4.5).
//!
//! Grounded on the general shape of `rattler_conda_types::MatchSpec`
//! parsing (name/version/build disambiguation from one source string), but
//! the actual grammar here is hawkey/libdnf's NEVRA-form enumeration, which
//! has no Conda analogue — `spec.md` §4.5 is followed directly.

/// Which of the five decomposition forms a candidate was produced by, in
/// the priority order spec.md §4.5 enumerates them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum SubjectForm {
    /// `name-[epoch:]version-release.arch`
    Nevra,
    /// `name-[epoch:]version-release`
    Nevr,
    /// `name-[epoch:]version`
    Nev,
    /// `name.arch`
    Na,
    /// `name`
    Name,
}

/// One candidate decomposition of a subject string. `epoch` is `None` when
/// the source string carried no epoch (spec.md S2: "epochless candidates
/// carry epoch=absent, not 0"), distinct from an explicit `0!`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NevraCandidate {
    /// Which form produced this candidate.
    pub form: SubjectForm,
    /// The candidate package name.
    pub name: String,
    /// The candidate epoch, absent unless the source string had `N:` in
    /// the version-or-release position.
    pub epoch: Option<u32>,
    /// The candidate version, present for every form except `Na`/`Name`.
    pub version: Option<String>,
    /// The candidate release, present only for `Nevra`/`Nevr`.
    pub release: Option<String>,
    /// The candidate architecture, present only for `Nevra`/`Na`.
    pub arch: Option<String>,
}

/// A free-form user string to be disambiguated against a sack.
#[derive(Debug, Clone)]
pub struct Subject<'a> {
    text: &'a str,
    /// Restrict enumeration to a single form; `None` enumerates all forms.
    hint: Option<SubjectForm>,
}

impl<'a> Subject<'a> {
    /// Creates a subject over `text`, enumerating every form.
    pub fn new(text: &'a str) -> Self {
        Self { text, hint: None }
    }

    /// Creates a subject restricted to a single decomposition form.
    pub fn with_form_hint(text: &'a str, form: SubjectForm) -> Self {
        Self {
            text,
            hint: Some(form),
        }
    }

    /// Lazily enumerates every candidate NEVRA decomposition, in the
    /// stable order spec.md §4.5 prescribes: NEVRA, NEVR, NEV, NA, NAME.
    /// Forms whose required separator is absent from `text` are skipped
    /// rather than yielding a degenerate candidate.
    pub fn candidates(&self) -> impl Iterator<Item = NevraCandidate> + '_ {
        let forms = [
            SubjectForm::Nevra,
            SubjectForm::Nevr,
            SubjectForm::Nev,
            SubjectForm::Na,
            SubjectForm::Name,
        ];
        forms
            .into_iter()
            .filter(move |f| self.hint.map_or(true, |hint| hint == *f))
            .filter_map(move |form| decompose(self.text, form))
    }
}

/// Splits a version-or-epoch-version segment (e.g. `8:3.6.9`) into
/// `(epoch, version)`.
fn split_epoch(segment: &str) -> (Option<u32>, String) {
    match segment.split_once(':') {
        Some((epoch_str, version)) if epoch_str.chars().all(|c| c.is_ascii_digit()) && !epoch_str.is_empty() => {
            (epoch_str.parse().ok(), version.to_string())
        }
        _ => (None, segment.to_string()),
    }
}

fn decompose(text: &str, form: SubjectForm) -> Option<NevraCandidate> {
    match form {
        SubjectForm::Nevra => {
            let (rest, arch) = text.rsplit_once('.')?;
            let (rest, release) = rest.rsplit_once('-')?;
            let (name, version_seg) = rest.rsplit_once('-')?;
            let (epoch, version) = split_epoch(version_seg);
            Some(NevraCandidate {
                form,
                name: name.to_string(),
                epoch,
                version: Some(version),
                release: Some(release.to_string()),
                arch: Some(arch.to_string()),
            })
        }
        SubjectForm::Nevr => {
            let (rest, release) = text.rsplit_once('-')?;
            let (name, version_seg) = rest.rsplit_once('-')?;
            let (epoch, version) = split_epoch(version_seg);
            Some(NevraCandidate {
                form,
                name: name.to_string(),
                epoch,
                version: Some(version),
                release: Some(release.to_string()),
                arch: None,
            })
        }
        SubjectForm::Nev => {
            let (name, version_seg) = text.rsplit_once('-')?;
            let (epoch, version) = split_epoch(version_seg);
            Some(NevraCandidate {
                form,
                name: name.to_string(),
                epoch,
                version: Some(version),
                release: None,
                arch: None,
            })
        }
        SubjectForm::Na => {
            let (name, arch) = text.rsplit_once('.')?;
            Some(NevraCandidate {
                form,
                name: name.to_string(),
                epoch: None,
                version: None,
                release: None,
                arch: Some(arch.to_string()),
            })
        }
        SubjectForm::Name => Some(NevraCandidate {
            form,
            name: text.to_string(),
            epoch: None,
            version: None,
            release: None,
            arch: None,
        }),
    }
}

/// A disambiguated reldep possibility: `name` with an optional `op evr`
/// suffix, split on the first whitespace run (spec.md §4.5 second half).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ReldepPossibility {
    /// The candidate reldep name.
    pub name: String,
    /// The raw `op evr` suffix, if present, e.g. `(">=", "1.0")`.
    pub constraint: Option<(String, String)>,
}

/// Splits `text` into a reldep possibility. Unlike NEVRA enumeration this
/// always yields exactly one candidate: the grammar is unambiguous once
/// split on the first whitespace run.
pub fn reldep_possibility(text: &str) -> ReldepPossibility {
    const OPS: [&str; 5] = ["<=", ">=", "<", "=", ">"];
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => {
            let rest = rest.trim_start();
            let constraint = OPS
                .iter()
                .find_map(|op| rest.strip_prefix(op).map(|evr| (op.to_string(), evr.trim().to_string())));
            ReldepPossibility {
                name: name.to_string(),
                constraint,
            }
        }
        None => ReldepPossibility {
            name: text.to_string(),
            constraint: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // S1 (NEVRA parse enumeration) and S2 (NEVR with no epoch) now live in
    // `tests/s1_s2_subject_scenarios.rs` as crate-level integration tests.

    #[test]
    fn test_single_word_only_yields_name_form() {
        let subject = Subject::new("bash");
        let candidates: Vec<_> = subject.candidates().collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].form, SubjectForm::Name);
        assert_eq!(candidates[0].name, "bash");
    }

    #[test]
    fn test_form_hint_restricts_enumeration() {
        let subject = Subject::with_form_hint("bash.x86_64", SubjectForm::Na);
        let candidates: Vec<_> = subject.candidates().collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].form, SubjectForm::Na);
        assert_eq!(candidates[0].arch.as_deref(), Some("x86_64"));
    }

    #[test]
    fn test_reldep_possibility_versioned() {
        let p = reldep_possibility("kernel >= 5.1-1");
        assert_eq!(p.name, "kernel");
        assert_eq!(p.constraint, Some((">=".to_string(), "5.1-1".to_string())));
    }

    #[test]
    fn test_reldep_possibility_bare() {
        let p = reldep_possibility("kernel");
        assert_eq!(p.name, "kernel");
        assert!(p.constraint.is_none());
    }
}
