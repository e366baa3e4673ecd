//! Tests for command parsing and dispatch.

use shellfolio_core::access::AccessState;
use shellfolio_core::{
    parse, Catalog, CommandContext, CommandError, CommandRegistry, Config, FnCommand,
    MemoryStorage, Output, OutputKind, ProgressStore,
};

struct Fixture {
    progress: ProgressStore,
    catalog: Catalog,
    access: AccessState,
    config: Config,
    history: Vec<String>,
}

impl Fixture {
    fn new() -> Self {
        let catalog = Catalog::builtin();
        Self {
            progress: ProgressStore::new(Box::new(MemoryStorage::new()), &catalog),
            catalog,
            access: AccessState::default(),
            config: Config::default(),
            history: Vec::new(),
        }
    }

    fn run(&mut self, registry: &CommandRegistry, input: &str) -> Output {
        let mut ctx = CommandContext {
            progress: &mut self.progress,
            catalog: &self.catalog,
            access: &mut self.access,
            config: &self.config,
            history: &self.history,
        };
        registry.execute(input, &mut ctx)
    }
}

fn help_and_clear() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(FnCommand::new("help", "help", |_, _| Ok(Output::text("help text"))));
    registry.register(FnCommand::new("clear", "clear", |_, _| Ok(Output::clear())));
    registry
}

#[test]
fn test_unknown_command_is_error() {
    let registry = help_and_clear();
    let mut fx = Fixture::new();
    let output = fx.run(&registry, "unknown-cmd");
    assert_eq!(output.kind, OutputKind::Error);
    assert!(!output.content.is_empty());
}

#[test]
fn test_handler_error_becomes_output() {
    let mut registry = CommandRegistry::new();
    registry.register(FnCommand::new("boom", "fails", |_, _| {
        Err(CommandError::Failed("kaboom".to_string()))
    }));
    let mut fx = Fixture::new();
    let output = fx.run(&registry, "boom");
    assert_eq!(output.kind, OutputKind::Error);
    assert_eq!(output.content, "kaboom");
}

#[test]
fn test_handler_panic_becomes_output() {
    let mut registry = CommandRegistry::new();
    registry.register(FnCommand::new("crash", "panics", |_, _| panic!("handler exploded")));
    let mut fx = Fixture::new();
    let output = fx.run(&registry, "crash");
    assert_eq!(output.kind, OutputKind::Error);
    assert!(output.content.contains("handler exploded"));

    // the registry keeps working afterwards
    registry.register(FnCommand::new("ok", "fine", |_, _| Ok(Output::text("fine"))));
    assert_eq!(fx.run(&registry, "ok").kind, OutputKind::Text);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let registry = help_and_clear();
    let mut fx = Fixture::new();
    assert_eq!(fx.run(&registry, "HELP").content, "help text");
    assert!(registry.contains("Help"));
}

#[test]
fn test_last_registration_wins() {
    let mut registry = CommandRegistry::new();
    registry.register(FnCommand::new("greet", "v1", |_, _| Ok(Output::text("hello"))));
    registry.register(FnCommand::new("GREET", "v2", |_, _| Ok(Output::text("howdy"))));
    let mut fx = Fixture::new();
    assert_eq!(registry.len(), 1);
    assert_eq!(fx.run(&registry, "greet").content, "howdy");
}

#[test]
fn test_args_reach_handler() {
    let mut registry = CommandRegistry::new();
    registry.register(FnCommand::new("args", "show args", |call, _| {
        Ok(Output::text(call.args.join("|")))
    }));
    let mut fx = Fixture::new();
    assert_eq!(fx.run(&registry, r#"args one "two three""#).content, "one|two three");
}

#[test]
fn test_parse_quoting() {
    let parsed = parse(r#"foo "bar baz" qux"#);
    assert_eq!(parsed.command, "foo");
    assert_eq!(parsed.args, vec!["bar baz".to_string(), "qux".to_string()]);
}

#[test]
fn test_list_contains_everything() {
    let registry = help_and_clear();
    let mut names: Vec<_> = registry.list().iter().map(|c| c.name().to_string()).collect();
    names.sort();
    assert_eq!(names, vec!["clear", "help"]);
}
