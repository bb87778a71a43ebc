use crate::collect::direct_module_dependencies;
use crate::error::WitnessError;
use crate::identity::derive_key;
use crate::model::ProjectModel;
use crate::policy::{ExclusionSet, WitnessPolicy};
use crate::ArtifactDigester;
use depwitness_types::{ContentDigest, DependencyKey};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Canonical `DependencyKey -> ContentDigest` mapping, ordered by [`DependencyKey`]'s `Ord`.
pub type DependencyHashMap = BTreeMap<DependencyKey, ContentDigest>;

/// A later configuration resolved a key to different content than the one already stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestConflict {
    pub key: DependencyKey,
    pub kept: ContentDigest,
    pub ignored: ContentDigest,
    pub configuration: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub configurations_scanned: u32,
    pub configurations_excluded: u32,
    pub configurations_unresolvable: u32,
    pub artifacts_hashed: u32,
}

#[derive(Clone, Debug, Default)]
pub struct HashMapBuild {
    pub map: DependencyHashMap,
    pub conflicts: Vec<DigestConflict>,
    pub stats: ScanStats,
}

/// One parsed `group:name:version:file:digest` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assertion {
    pub key: DependencyKey,
    pub digest: String,
}

#[derive(Clone, Debug, Default)]
pub struct Verification {
    pub build: HashMapBuild,
    pub assertions_checked: u32,
}

/// Aggregate the digest of every directly requested module artifact across the project's
/// ordinary and buildscript configurations.
///
/// Configurations are visited in canonical order and the first configuration to produce a
/// key fixes its digest.
pub fn build_hash_map(
    project: &ProjectModel,
    exclusions: &ExclusionSet,
    digester: &dyn ArtifactDigester,
) -> Result<HashMapBuild, WitnessError> {
    let mut build = HashMapBuild::default();

    for entry in exclusions.unmatched(project) {
        tracing::warn!(
            project = %project.name,
            exclusion = %entry,
            "exclusion matches no configuration"
        );
    }

    for (scope, configuration) in project.canonical_configurations() {
        let scoped = project.scoped_name(&configuration.name);

        if let Some(ancestor) = exclusions.excluding_ancestor(project, scope, configuration) {
            tracing::info!(configuration = %scoped, excluded_by = ancestor, "skipping excluded configuration");
            build.stats.configurations_excluded += 1;
            continue;
        }

        if !configuration.resolvable {
            tracing::debug!(configuration = %scoped, "skipping unresolvable configuration");
            build.stats.configurations_unresolvable += 1;
            continue;
        }

        build.stats.configurations_scanned += 1;

        for path in direct_module_dependencies(configuration) {
            let key = derive_key(path)?;
            let digest = digester
                .digest(path)
                .map_err(|source| WitnessError::UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            build.stats.artifacts_hashed += 1;

            match build.map.entry(key) {
                Entry::Vacant(slot) => {
                    tracing::trace!(key = %slot.key(), configuration = %scoped, "hashed dependency");
                    slot.insert(digest);
                }
                Entry::Occupied(existing) if *existing.get() != digest => {
                    tracing::warn!(
                        key = %existing.key(),
                        configuration = %scoped,
                        kept = %existing.get(),
                        ignored = %digest,
                        "configurations disagree on dependency digest; keeping the first"
                    );
                    build.conflicts.push(DigestConflict {
                        key: existing.key().clone(),
                        kept: existing.get().clone(),
                        ignored: digest,
                        configuration: scoped.to_string(),
                    });
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    Ok(build)
}

/// Parse `group:name:version:file:digest`.
pub fn parse_assertion(text: &str) -> Result<Assertion, WitnessError> {
    let parts: Vec<&str> = text.split(':').collect();
    let [group, name, version, file, digest] = parts.as_slice() else {
        return Err(WitnessError::MalformedAssertion {
            assertion: text.to_string(),
        });
    };
    Ok(Assertion {
        key: DependencyKey::new(*group, *name, *version, *file),
        digest: (*digest).to_string(),
    })
}

/// Check assertions, in order, against an already aggregated map.
///
/// Stops at the first failure. Returns the number of assertions checked.
pub fn verify_against(
    map: &DependencyHashMap,
    assertions: &[String],
) -> Result<u32, WitnessError> {
    let mut checked = 0;
    for text in assertions {
        let assertion = parse_assertion(text)?;
        tracing::debug!(dependency = %assertion.key.short(), "verifying");

        let Some(actual) = map.get(&assertion.key) else {
            return Err(WitnessError::MissingDependency {
                assertion: text.clone(),
                short: assertion.key.short(),
            });
        };

        if actual.as_str() != assertion.digest {
            return Err(WitnessError::ChecksumMismatch {
                key: assertion.key,
                expected: assertion.digest,
                actual: actual.clone(),
            });
        }
        checked += 1;
    }
    Ok(checked)
}

/// Aggregate the project once, then check every assertion against the result.
///
/// Callers that need the scan counters of a failing run call [`build_hash_map`] and
/// [`check_assertions`] themselves.
pub fn verify(
    project: &ProjectModel,
    assertions: &[String],
    policy: &WitnessPolicy,
    digester: &dyn ArtifactDigester,
) -> Result<Verification, WitnessError> {
    let build = build_hash_map(project, &policy.exclusions, digester)?;
    let assertions_checked = check_assertions(&build, assertions, policy)?;
    Ok(Verification {
        build,
        assertions_checked,
    })
}

/// Apply the consistency policy to an aggregated build, then check assertions against it.
pub fn check_assertions(
    build: &HashMapBuild,
    assertions: &[String],
    policy: &WitnessPolicy,
) -> Result<u32, WitnessError> {
    enforce_consistency(build, policy)?;
    let checked = verify_against(&build.map, assertions)?;
    tracing::info!(
        assertions = checked,
        dependencies = build.map.len(),
        "dependency verification passed"
    );
    Ok(checked)
}

/// Render the aggregated map as paste-ready assertions, in key order.
pub fn emit_assertions(
    project: &ProjectModel,
    policy: &WitnessPolicy,
    digester: &dyn ArtifactDigester,
) -> Result<Vec<String>, WitnessError> {
    let build = build_hash_map(project, &policy.exclusions, digester)?;
    enforce_consistency(&build, policy)?;
    Ok(render_assertions(&build.map))
}

pub fn render_assertions(map: &DependencyHashMap) -> Vec<String> {
    map.iter()
        .map(|(key, digest)| format!("{}:{}", key.all(), digest))
        .collect()
}

fn enforce_consistency(build: &HashMapBuild, policy: &WitnessPolicy) -> Result<(), WitnessError> {
    if !policy.fail_on_conflict {
        return Ok(());
    }
    match build.conflicts.first() {
        Some(conflict) => Err(WitnessError::ConflictingDigest {
            key: conflict.key.clone(),
            first: conflict.kept.clone(),
            second: conflict.ignored.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        artifact, config, module_edge, project, with_module, MemoryDigester,
    };

    const JAR: &str = "cache/com.example/lib/1.0/f00/lib-1.0.jar";

    fn sample() -> (ProjectModel, MemoryDigester) {
        let mut compile = config("compile", &[]);
        with_module(&mut compile, "com.example", "lib", "1.0", JAR);

        let mut test_compile = config("testCompile", &["compile"]);
        with_module(
            &mut test_compile,
            "junit",
            "junit",
            "4.12",
            "cache/junit/junit/4.12/b4d/junit-4.12.jar",
        );

        let digester = MemoryDigester::default()
            .with(JAR, "aa11")
            .with("cache/junit/junit/4.12/b4d/junit-4.12.jar", "bb22");
        (project("app", vec![compile, test_compile]), digester)
    }

    #[test]
    fn aggregates_every_direct_dependency() {
        let (p, d) = sample();
        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        assert_eq!(
            render_assertions(&build.map),
            vec![
                "com.example:lib:1.0:lib-1.0.jar:aa11".to_string(),
                "junit:junit:4.12:junit-4.12.jar:bb22".to_string(),
            ]
        );
        assert_eq!(build.stats.configurations_scanned, 2);
        assert_eq!(build.stats.artifacts_hashed, 2);
    }

    #[test]
    fn excluding_parent_excludes_child() {
        let (p, d) = sample();
        let build = build_hash_map(&p, &ExclusionSet::parse("compile"), &d).expect("build");
        assert!(build.map.is_empty());
        assert_eq!(build.stats.configurations_excluded, 2);
    }

    #[test]
    fn excluding_child_keeps_parent() {
        let (p, d) = sample();
        let build =
            build_hash_map(&p, &ExclusionSet::parse("app:testCompile"), &d).expect("build");
        let keys: Vec<String> = build.map.keys().map(DependencyKey::all).collect();
        assert_eq!(keys, vec!["com.example:lib:1.0:lib-1.0.jar"]);
    }

    #[test]
    fn exclusion_for_another_project_does_not_apply() {
        let (p, d) = sample();
        let build = build_hash_map(&p, &ExclusionSet::parse("lib:compile"), &d).expect("build");
        assert_eq!(build.map.len(), 2);
    }

    #[test]
    fn unresolvable_configurations_are_skipped() {
        let (mut p, d) = sample();
        p.configurations[0].resolvable = false;
        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        assert_eq!(build.stats.configurations_unresolvable, 1);
        assert_eq!(build.map.len(), 1);
    }

    #[test]
    fn buildscript_configurations_are_included() {
        let (mut p, d) = sample();
        let mut classpath = config("classpath", &[]);
        with_module(
            &mut classpath,
            "com.android.tools.build",
            "gradle",
            "8.0",
            "c/com.android.tools.build/gradle/8.0/x/gradle-8.0.jar",
        );
        p.buildscript.push(classpath);
        let d = d.with("c/com.android.tools.build/gradle/8.0/x/gradle-8.0.jar", "cc33");
        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        assert_eq!(build.map.len(), 3);
    }

    #[test]
    fn first_writer_wins_and_conflict_is_recorded() {
        let mut a = config("a", &[]);
        with_module(&mut a, "g", "n", "1", "one/g/n/1/s/n-1.jar");
        let mut b = config("b", &[]);
        with_module(&mut b, "g", "n", "1", "two/g/n/1/s/n-1.jar");
        let p = project("app", vec![b, a]);
        let d = MemoryDigester::default()
            .with("one/g/n/1/s/n-1.jar", "0001")
            .with("two/g/n/1/s/n-1.jar", "0002");

        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        let digest = build.map.values().next().expect("one entry");
        assert_eq!(digest.as_str(), "0001", "configuration `a` is visited first");
        assert_eq!(build.conflicts.len(), 1);
        assert_eq!(build.conflicts[0].configuration, "app:b");

        let lenient = WitnessPolicy::default();
        assert!(emit_assertions(&p, &lenient, &d).is_ok());

        let strict = WitnessPolicy {
            fail_on_conflict: true,
            ..WitnessPolicy::default()
        };
        let err = emit_assertions(&p, &strict, &d).expect_err("conflict");
        assert_eq!(err.code(), "conflicting_digest");
    }

    #[test]
    fn identical_digests_are_not_conflicts() {
        let mut a = config("a", &[]);
        with_module(&mut a, "g", "n", "1", "one/g/n/1/s/n-1.jar");
        let mut b = config("b", &[]);
        with_module(&mut b, "g", "n", "1", "one/g/n/1/s/n-1.jar");
        let p = project("app", vec![a, b]);
        let d = MemoryDigester::default().with("one/g/n/1/s/n-1.jar", "0001");
        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        assert!(build.conflicts.is_empty());
    }

    #[test]
    fn check_assertions_keeps_build_stats_available() {
        let (p, d) = sample();
        let build = build_hash_map(&p, &ExclusionSet::default(), &d).expect("build");
        let assertions = vec!["junit:junit:4.12:junit-4.12.jar:bb22".to_string()];
        let checked = check_assertions(&build, &assertions, &WitnessPolicy::default())
            .expect("check");
        assert_eq!(checked, 1);

        let tampered = vec!["junit:junit:4.12:junit-4.12.jar:bb23".to_string()];
        assert!(check_assertions(&build, &tampered, &WitnessPolicy::default()).is_err());
        assert_eq!(build.stats.artifacts_hashed, 2);
    }

    #[test]
    fn verify_matches_the_split_path() {
        let (p, d) = sample();
        let policy = WitnessPolicy::default();
        let assertions = emit_assertions(&p, &policy, &d).expect("emit");

        let whole = verify(&p, &assertions, &policy, &d).expect("verify");
        let build = build_hash_map(&p, &policy.exclusions, &d).expect("build");
        let checked = check_assertions(&build, &assertions, &policy).expect("check");

        assert_eq!(whole.assertions_checked, checked);
        assert_eq!(whole.build.map, build.map);
        assert_eq!(whole.build.stats, build.stats);
    }

    #[test]
    fn malformed_artifact_path_fails() {
        let mut c = config("compile", &[]);
        c.resolution.dependencies = vec![module_edge("g", "n", "1")];
        c.resolution.artifacts = vec![artifact("g", "n", "1", "libs/n-1.jar")];
        let p = project("app", vec![c]);
        let d = MemoryDigester::default().with("libs/n-1.jar", "00");
        let err = build_hash_map(&p, &ExclusionSet::default(), &d).expect_err("malformed");
        assert!(matches!(err, WitnessError::MalformedPath { .. }));
    }

    #[test]
    fn unreadable_artifact_fails() {
        let (p, _) = sample();
        let err = build_hash_map(&p, &ExclusionSet::default(), &MemoryDigester::default())
            .expect_err("unreadable");
        assert!(matches!(err, WitnessError::UnreadableFile { .. }));
    }

    #[test]
    fn verify_with_no_assertions_succeeds() {
        let (p, d) = sample();
        let v = verify(&p, &[], &WitnessPolicy::default(), &d).expect("vacuous");
        assert_eq!(v.assertions_checked, 0);
    }

    #[test]
    fn verify_accepts_correct_digest() {
        let (p, d) = sample();
        let assertions = vec!["com.example:lib:1.0:lib-1.0.jar:aa11".to_string()];
        let v = verify(&p, &assertions, &WitnessPolicy::default(), &d).expect("verify");
        assert_eq!(v.assertions_checked, 1);
    }

    #[test]
    fn verify_rejects_changed_digest() {
        let (p, d) = sample();
        let assertions = vec!["com.example:lib:1.0:lib-1.0.jar:aa12".to_string()];
        let err = verify(&p, &assertions, &WitnessPolicy::default(), &d).expect_err("mismatch");
        match err {
            WitnessError::ChecksumMismatch {
                key,
                expected,
                actual,
            } => {
                assert_eq!(key.short(), "com.example:lib:1.0");
                assert_eq!(expected, "aa12");
                assert_eq!(actual.as_str(), "aa11");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn verify_reports_missing_dependency() {
        let (p, d) = sample();
        let assertions = vec!["com.example:gone:1.0:gone-1.0.jar:aa11".to_string()];
        let err = verify(&p, &assertions, &WitnessPolicy::default(), &d).expect_err("missing");
        assert!(matches!(err, WitnessError::MissingDependency { .. }));
        assert!(err.to_string().contains("com.example:gone:1.0"));
    }

    #[test]
    fn verify_reports_dependency_removed_by_exclusion() {
        let (p, d) = sample();
        let assertions = vec!["junit:junit:4.12:junit-4.12.jar:bb22".to_string()];
        let policy = WitnessPolicy {
            exclusions: ExclusionSet::parse("testCompile"),
            fail_on_conflict: false,
        };
        let err = verify(&p, &assertions, &policy, &d).expect_err("missing");
        assert!(matches!(err, WitnessError::MissingDependency { .. }));
    }

    #[test]
    fn four_field_assertion_is_malformed() {
        let (p, d) = sample();
        let assertions = vec!["com.example:lib:1.0:aa11".to_string()];
        let err = verify(&p, &assertions, &WitnessPolicy::default(), &d).expect_err("malformed");
        assert!(matches!(err, WitnessError::MalformedAssertion { .. }));
    }

    #[test]
    fn six_field_assertion_is_malformed() {
        assert!(parse_assertion("a:b:c:d:e:f").is_err());
        assert!(parse_assertion("").is_err());
    }

    #[test]
    fn verify_stops_at_first_failure() {
        let (p, d) = sample();
        let assertions = vec![
            "com.example:gone:1.0:gone-1.0.jar:aa11".to_string(),
            "not-an-assertion".to_string(),
        ];
        let err = verify(&p, &assertions, &WitnessPolicy::default(), &d).expect_err("fails");
        assert!(matches!(err, WitnessError::MissingDependency { .. }));
    }

    #[test]
    fn emitted_assertions_round_trip() {
        let (p, d) = sample();
        let policy = WitnessPolicy::default();
        let emitted = emit_assertions(&p, &policy, &d).expect("emit");
        let v = verify(&p, &emitted, &policy, &d).expect("round trip");
        assert_eq!(v.assertions_checked as usize, emitted.len());
    }
}
