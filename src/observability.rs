use biometrics::{Collector, Counter};

pub(crate) static SHELL_TURNS: Counter = Counter::new("sistema.shell.turns");
pub(crate) static SHELL_COMMANDS: Counter = Counter::new("sistema.shell.commands");
pub(crate) static SHELL_UNKNOWN_COMMANDS: Counter =
    Counter::new("sistema.shell.unknown_commands");
pub(crate) static SHELL_INTERRUPTS: Counter = Counter::new("sistema.shell.interrupts");

pub(crate) static HISTORY_EVICTIONS: Counter = Counter::new("sistema.history.evictions");
pub(crate) static HISTORY_CLEARS: Counter = Counter::new("sistema.history.clears");

pub(crate) static CONFIG_LOAD_FAILURES: Counter = Counter::new("sistema.config.load_failures");

pub(crate) static RESPOND_FALLBACKS: Counter = Counter::new("sistema.respond.fallbacks");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&SHELL_TURNS);
    collector.register_counter(&SHELL_COMMANDS);
    collector.register_counter(&SHELL_UNKNOWN_COMMANDS);
    collector.register_counter(&SHELL_INTERRUPTS);

    collector.register_counter(&HISTORY_EVICTIONS);
    collector.register_counter(&HISTORY_CLEARS);

    collector.register_counter(&CONFIG_LOAD_FAILURES);

    collector.register_counter(&RESPOND_FALLBACKS);
}
