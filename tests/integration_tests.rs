//! Integration tests for the sistema shell loop.
//! These drive `shell::run` with scripted input and record the output.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::num::NonZeroUsize;

    use sistema::shell::{
        self, ChatSession, FAREWELL_MESSAGE, Input, Interrupt, LineSource, NO_HISTORY_MESSAGE,
        ShellState, Termination,
    };
    use sistema::{Config, Entry, Error, KeywordResponder, Renderer, Result, WithFallback};

    /// Replays a fixed list of reads, then reports end of input.
    struct Script {
        reads: VecDeque<Result<Input>>,
        prompts: usize,
    }

    impl Script {
        fn lines(lines: &[&str]) -> Self {
            Self::new(lines.iter().map(|l| Ok(Input::Line(l.to_string()))).collect())
        }

        fn new(reads: Vec<Result<Input>>) -> Self {
            Self {
                reads: reads.into(),
                prompts: 0,
            }
        }
    }

    impl LineSource for Script {
        fn read_line(&mut self, _prompt: &str) -> Result<Input> {
            self.prompts += 1;
            self.reads.pop_front().unwrap_or(Ok(Input::EndOfInput))
        }
    }

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl Renderer for Recorder {
        fn print_banner(&mut self, system_name: &str, version: &str) {
            self.lines.push(format!("[{system_name} {version}]"));
        }
        fn print_info(&mut self, info: &str) {
            self.lines.push(info.to_string());
        }
        fn print_heading(&mut self, heading: &str) {
            self.lines.push(heading.to_string());
        }
        fn print_success(&mut self, message: &str) {
            self.lines.push(message.to_string());
        }
        fn print_hint(&mut self, hint: &str) {
            self.lines.push(hint.to_string());
        }
        fn print_reply(&mut self, reply: &str) {
            self.lines.push(format!("Sistema: {reply}"));
        }
        fn print_history_entry(&mut self, index: usize, entry: &Entry) {
            self.lines
                .push(format!("{index}. {}: {}", entry.role, entry.content));
        }
        fn print_help_entry(&mut self, command: &str, description: &str) {
            self.lines.push(format!("{command} - {description}"));
        }
        fn print_config_entry(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{key}: {value}"));
        }
        fn print_warning(&mut self, warning: &str) {
            self.lines.push(format!("Warning: {warning}"));
        }
        fn print_error(&mut self, error: &str) {
            self.lines.push(format!("Error: {error}"));
        }
        fn finish_section(&mut self) {}
    }

    fn keyword_session(max_history: usize) -> ChatSession<KeywordResponder> {
        let config = Config::new().with_max_history(NonZeroUsize::new(max_history).unwrap());
        ChatSession::new(config, KeywordResponder::new())
    }

    #[test]
    fn quit_command_ends_loop() {
        let mut session = keyword_session(10);
        let mut input = Script::lines(&["/quit", "never read"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Quit);
        assert_eq!(session.state(), ShellState::Terminated);
        assert_eq!(input.prompts, 1);
        assert_eq!(out.lines, vec![FAREWELL_MESSAGE.to_string()]);
    }

    #[test]
    fn full_conversation() {
        let mut session = keyword_session(10);
        let mut input = Script::lines(&["", "hola", "/HISTORY", "  ", "/foo", "/salir"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Quit);
        assert_eq!(session.history().len(), 2);
        assert_eq!(
            out.lines,
            vec![
                "Sistema: ¡Hola! Soy tu asistente personal de IA. ¿En qué puedo ayudarte hoy?"
                    .to_string(),
                "Historial de conversación:".to_string(),
                "1. User: hola".to_string(),
                "2. Assistant: ¡Hola! Soy tu asistente personal de IA. ¿En qué puedo ayudarte hoy?"
                    .to_string(),
                "Error: Comando no reconocido: foo".to_string(),
                "Usa '/help' para ver los comandos disponibles.".to_string(),
                FAREWELL_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn history_bound_applies_per_entry() {
        let mut session = keyword_session(3);
        let mut input = Script::lines(&["a", "b", "c", "d", "/history"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        let roles: Vec<String> = session
            .history()
            .iter()
            .map(|entry| entry.role.to_string())
            .collect();
        assert_eq!(roles, vec!["Assistant", "User", "Assistant"]);
        let user: Vec<&Entry> = session
            .history()
            .iter()
            .filter(|entry| entry.content == "d")
            .collect();
        assert_eq!(user.len(), 1);
        assert!(out.lines.iter().any(|line| line == "2. User: d"));
    }

    #[test]
    fn empty_history_then_end_of_input() {
        let mut session = keyword_session(10);
        let mut input = Script::lines(&["/history"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::EndOfInput);
        assert_eq!(
            out.lines,
            vec![NO_HISTORY_MESSAGE.to_string(), FAREWELL_MESSAGE.to_string()]
        );
    }

    #[test]
    fn prompt_interrupt_is_a_graceful_quit() {
        let mut session = keyword_session(10);
        let mut input = Script::new(vec![
            Ok(Input::Line("hola".to_string())),
            Ok(Input::Interrupted),
            Ok(Input::Line("never read".to_string())),
        ]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Interrupted);
        assert_eq!(out.lines.last().map(String::as_str), Some(FAREWELL_MESSAGE));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn interrupt_flag_stops_before_next_read() {
        let mut session = keyword_session(10);
        let mut input = Script::lines(&["hola"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();
        flag.request();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Interrupted);
        assert_eq!(input.prompts, 0);
        assert!(session.history().is_empty());
    }

    /// Delivers an interrupt while blocked, then returns a line anyway.
    struct InterruptedRead<'a> {
        interrupt: &'a Interrupt,
        blocked: Vec<bool>,
    }

    impl LineSource for InterruptedRead<'_> {
        fn read_line(&mut self, _prompt: &str) -> Result<Input> {
            self.blocked.push(self.interrupt.request());
            Ok(Input::Line("hola".to_string()))
        }
    }

    #[test]
    fn interrupt_during_read_drops_the_line() {
        let mut session = keyword_session(10);
        let flag = Interrupt::new();
        let mut input = InterruptedRead {
            interrupt: &flag,
            blocked: Vec::new(),
        };
        let mut out = Recorder::default();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Interrupted);
        assert_eq!(input.blocked, vec![true]);
        assert!(session.history().is_empty());
        assert_eq!(out.lines, vec![FAREWELL_MESSAGE.to_string()]);
        assert!(!flag.request(), "loop left the read mark set");
    }

    #[test]
    fn input_failure_is_an_error() {
        let mut session = keyword_session(10);
        let mut input = Script::new(vec![
            Ok(Input::Line("hola".to_string())),
            Err(Error::input("terminal went away", None)),
        ]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let err = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap_err();

        assert!(err.is_input());
        assert!(err.to_string().contains("terminal went away"));
        assert!(session.is_running());
    }

    #[test]
    fn failing_generator_degrades_to_fallback() {
        let generator = WithFallback::new(|_: &str, _: &Config| -> Result<String> {
            Err(Error::generation("unreachable service"))
        });
        let mut session = ChatSession::new(Config::new(), generator);
        let mut input = Script::lines(&["hola", "/quit"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        let termination = shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert_eq!(termination, Termination::Quit);
        assert_eq!(
            out.lines[0],
            format!("Sistema: {}", sistema::respond::FALLBACK_REPLY)
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn config_command_reflects_loaded_file() {
        let path = std::env::temp_dir().join(format!(
            "sistema-integration-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"max_history": 2, "owner": "ana"}"#).unwrap();
        let load = Config::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(load.warning.is_none());

        let mut session = ChatSession::new(load.config, KeywordResponder::new());
        let mut input = Script::lines(&["/config", "uno", "dos"]);
        let mut out = Recorder::default();
        let flag = Interrupt::new();

        shell::run(&mut session, &mut input, &mut out, "> ", &flag).unwrap();

        assert!(out.lines.contains(&"max_history: 2".to_string()));
        assert!(out.lines.contains(&"owner: ana".to_string()));
        assert_eq!(session.history().len(), 2);
    }
}
