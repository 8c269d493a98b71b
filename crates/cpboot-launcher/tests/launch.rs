//! Full bootstrap runs against targets linked into this test binary.

mod common;

use std::path::PathBuf;
use std::sync::Mutex;

use cpboot_launcher::{
    launch_target, Bootstrap, BootstrapConfig, BoxError, Dispatcher, LaunchError, LoadingContext,
    LEGACY_CLASSPATH_PROPERTY,
};
use cpboot_module::{ConflictPolicy, IgnoreRules, MergeSpec, Module, ModuleError, ModuleLayer, ModulePlanner};
use pretty_assertions::assert_eq;

use common::{launcher_jar, write_jar};

struct Call {
    provider: &'static str,
    args: Vec<String>,
    context: String,
    classpath: Option<String>,
}

static CALLS: Mutex<Vec<Call>> = Mutex::new(Vec::new());

fn record(provider: &'static str, args: &[String]) -> Result<(), BoxError> {
    let context = LoadingContext::current().ok_or("no context installed")?;
    CALLS.lock().unwrap().push(Call {
        provider,
        args: args.to_vec(),
        context: context.name().to_string(),
        classpath: context.property(LEGACY_CLASSPATH_PROPERTY).map(str::to_string),
    });
    Ok(())
}

fn game_main(args: &[String]) -> Result<(), BoxError> {
    record("test.Game", args)
}

fn first_main(args: &[String]) -> Result<(), BoxError> {
    record("test.AmbA", args)
}

fn second_main(args: &[String]) -> Result<(), BoxError> {
    record("test.AmbB", args)
}

fn merged_main(args: &[String]) -> Result<(), BoxError> {
    record("test.Merged", args)
}

launch_target!(GAME, "test.Game", game_main);
launch_target!(AMB_A, "test.AmbA", first_main);
launch_target!(AMB_B, "test.AmbB", second_main);
launch_target!(MERGED, "test.Merged", merged_main);

fn calls_for(provider: &str) -> Vec<(Vec<String>, String, Option<String>)> {
    CALLS
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.provider == provider)
        .map(|c| (c.args.clone(), c.context.clone(), c.classpath.clone()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_hand_off_to_single_target() {
    let dir = tempfile::tempdir().unwrap();
    let lib = write_jar(dir.path(), "lib-1.2.jar", &[("lib/Util.class", "")]);
    let game = launcher_jar(dir.path(), "game.jar", "game", "test.Game");
    let classpath = vec![lib, game];
    let args = strings(&["--launchTarget", "client", "--gameDir", "."]);

    let config = BootstrapConfig::new(classpath.clone()).with_args(args.clone());
    Bootstrap::new(config).launch(&Dispatcher::linked()).unwrap();

    let calls = calls_for("test.Game");
    assert_eq!(calls.len(), 1);
    let (seen_args, context, seen_classpath) = &calls[0];
    assert_eq!(seen_args, &args);
    assert_eq!(context, "MC-BOOTSTRAP");
    assert_eq!(
        seen_classpath.as_deref(),
        Some(cpboot_launcher::join_classpath(&classpath).unwrap().as_str())
    );
    assert!(LoadingContext::current().is_none());
}

#[test]
fn test_no_registered_target() {
    let dir = tempfile::tempdir().unwrap();
    let app = launcher_jar(dir.path(), "app.jar", "app", "test.NotLinked");

    let err = Bootstrap::new(BootstrapConfig::new(vec![app]))
        .launch(&Dispatcher::linked())
        .unwrap_err();
    match err {
        LaunchError::NoEntryPoint { capability, declared } => {
            assert_eq!(capability, "launch");
            assert_eq!(declared, strings(&["test.NotLinked"]));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_linked_but_undeclared_target_is_not_eligible() {
    let dir = tempfile::tempdir().unwrap();
    let plain = write_jar(dir.path(), "plain.jar", &[("plain/A.class", "")]);

    let err = Bootstrap::new(BootstrapConfig::new(vec![plain]))
        .launch(&Dispatcher::linked())
        .unwrap_err();
    assert!(matches!(err, LaunchError::NoEntryPoint { .. }));
}

#[test]
fn test_ambiguous_targets_invoke_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let a = launcher_jar(dir.path(), "a.jar", "a", "test.AmbA");
    let b = launcher_jar(dir.path(), "b.jar", "b", "test.AmbB");

    let err = Bootstrap::new(BootstrapConfig::new(vec![a, b]))
        .launch(&Dispatcher::linked())
        .unwrap_err();
    match err {
        LaunchError::AmbiguousEntryPoint { providers, .. } => {
            assert_eq!(providers, strings(&["test.AmbA", "test.AmbB"]));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(calls_for("test.AmbA").is_empty());
    assert!(calls_for("test.AmbB").is_empty());
}

#[test]
fn test_merged_modules_launch() {
    let dir = tempfile::tempdir().unwrap();
    let api = write_jar(dir.path(), "merged-api.jar", &[("api/Api.class", "")]);
    let core = launcher_jar(dir.path(), "merged-core.jar", "core", "test.Merged");

    let planner = ModulePlanner::new(
        IgnoreRules::default(),
        MergeSpec::parse("app=merged-api.jar,merged-core.jar"),
        ConflictPolicy::default(),
    );
    let config = BootstrapConfig::new(vec![api, core]).with_planner(planner);
    let bootstrap = Bootstrap::new(config);

    let context = bootstrap.build_context().unwrap();
    assert_eq!(context.layer().modules().len(), 1);
    assert_eq!(context.module_for_package("api").unwrap().name(), "app");
    assert_eq!(context.module_for_package("core").unwrap().name(), "app");

    bootstrap.launch(&Dispatcher::linked()).unwrap();
    assert_eq!(calls_for("test.Merged").len(), 1);
}

#[test]
fn test_shadowed_classes_resolve_to_first_owner() {
    let dir = tempfile::tempdir().unwrap();
    let old = write_jar(dir.path(), "shared-old.jar", &[("shared/Cls.class", "old")]);
    let new = write_jar(
        dir.path(),
        "shared-new.jar",
        &[("shared/Cls.class", "new"), ("extra/Cls.class", "extra")],
    );

    let context = Bootstrap::new(BootstrapConfig::new(vec![old.clone(), new]))
        .build_context()
        .unwrap();
    let found = context.find_resource("shared/Cls.class").unwrap().unwrap();
    assert_eq!(found.module, "shared.old");
    assert_eq!(found.origin, old);
    assert_eq!(found.bytes, b"old");
    assert_eq!(context.module_for_package("extra").unwrap().name(), "shared.new");
}

#[test]
fn test_default_ignore_list_skips_entries() {
    let dir = tempfile::tempdir().unwrap();
    let asm = write_jar(dir.path(), "asm-9.5.jar", &[("org/objectweb/asm/A.class", "")]);
    let app = write_jar(dir.path(), "app.jar", &[("app/A.class", "")]);

    let context = Bootstrap::new(BootstrapConfig::new(vec![asm, app]))
        .build_context()
        .unwrap();
    let names: Vec<&str> = context.layer().modules().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["app"]);
    assert!(context.module_for_package("org.objectweb.asm").is_none());
}

#[test]
fn test_package_provided_by_boot_layer() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_jar(dir.path(), "app.jar", &[("app/A.class", "")]);
    let boot = ModuleLayer::boot(vec![Module::declared("host", ["app"])]).unwrap();

    let err = Bootstrap::new(BootstrapConfig::new(vec![app]))
        .with_boot_layer(boot)
        .build_context()
        .unwrap_err();
    assert!(matches!(err, LaunchError::Module(ModuleError::ParentPackage { .. })));
}

#[test]
fn test_boot_layer_packages_visible_through_context() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_jar(dir.path(), "app.jar", &[("app/A.class", "")]);
    let boot = ModuleLayer::boot(vec![Module::declared("host", ["host.api"])]).unwrap();

    let context = Bootstrap::new(BootstrapConfig::new(vec![app]))
        .with_boot_layer(boot)
        .build_context()
        .unwrap();
    assert_eq!(context.module_for_package("host.api").unwrap().name(), "host");
    assert_eq!(context.module_for_package("app").unwrap().name(), "app");
}

#[test]
fn test_missing_entry_is_fatal() {
    let missing = PathBuf::from("/nonexistent/cpboot/missing.jar");
    let err = Bootstrap::new(BootstrapConfig::new(vec![missing]))
        .build_context()
        .unwrap_err();
    assert!(matches!(err, LaunchError::Module(ModuleError::Archive(_))));
}
