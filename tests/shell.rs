mod common;

use common::{MockPlatform, MockPort};
use diagshell::serial::Error;
use diagshell::system::builtins::BUILTINS;
use diagshell::system::command::DispatchOutcome;
use diagshell::system::shell::*;
use diagshell::system::{ASCII_BACKSPACE, ASCII_DEL};
use diagshell::time::TickCounter;

static TICKS: TickCounter = TickCounter::new();

fn new_shell() -> Shell {
    Shell::new(&BUILTINS, &TICKS)
}

/// Feed `input` through a fresh port and return what the shell wrote
fn run(shell: &mut Shell, input: &[u8]) -> String {
    let mut port = MockPort::with_input(input);
    let mut platform = MockPlatform::default();
    shell.poll(&mut port, &mut platform).unwrap();
    port.take_output()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_creation() {
        let shell = new_shell();
        assert_eq!(shell.state(), State::Idle);
        assert!(shell.buffer().is_empty());
        assert_eq!(shell.buffer().capacity(), 100);
    }

    #[test]
    fn test_input_printable_characters() {
        let mut shell = new_shell();

        let echoed = run(&mut shell, b"hello");
        assert_eq!(echoed, "> hello");
        assert_eq!(shell.state(), State::Editing);
        assert_eq!(shell.buffer().as_bytes(), b"hello");
    }

    #[test]
    fn test_prompt_only_before_first_byte() {
        let mut shell = new_shell();

        assert_eq!(run(&mut shell, b"he"), "> he");
        assert_eq!(run(&mut shell, b"llo"), "llo");
    }

    #[test]
    fn test_input_no_echo() {
        let mut shell = new_shell();
        shell.set_echo(false);

        let echoed = run(&mut shell, b"hello");
        assert_eq!(echoed, "");
        assert_eq!(shell.buffer().as_bytes(), b"hello");
    }

    #[test]
    fn test_custom_prompt() {
        let mut shell = new_shell();
        shell.set_prompt("diag$ ");

        assert_eq!(run(&mut shell, b"x"), "diag$ x");
    }

    #[test]
    fn test_input_backspace_redisplays_line() {
        let mut shell = new_shell();
        run(&mut shell, b"hello");

        let echoed = run(&mut shell, &[ASCII_BACKSPACE, ASCII_BACKSPACE]);
        assert_eq!(echoed, "\r\n> hell\r\n> hel");
        assert_eq!(shell.buffer().as_bytes(), b"hel");
        assert_eq!(shell.state(), State::Editing);
    }

    #[test]
    fn test_input_delete() {
        let mut shell = new_shell();
        run(&mut shell, b"test");

        let echoed = run(&mut shell, &[ASCII_DEL]);
        assert_eq!(echoed, "\r\n> tes");
        assert_eq!(shell.buffer().as_bytes(), b"tes");
    }

    #[test]
    fn test_backspace_to_empty_returns_to_idle() {
        let mut shell = new_shell();
        run(&mut shell, b"a");

        let echoed = run(&mut shell, &[ASCII_BACKSPACE]);
        assert_eq!(echoed, "\r\n> ");
        assert_eq!(shell.state(), State::Idle);

        // The prompt is already on screen, so it is not printed again
        assert_eq!(run(&mut shell, b"b"), "b");
    }

    #[test]
    fn test_input_backspace_empty_buffer() {
        let mut shell = new_shell();

        let echoed = run(&mut shell, &[ASCII_BACKSPACE, ASCII_DEL]);
        assert_eq!(echoed, "");
        assert_eq!(shell.state(), State::Idle);
    }

    #[test]
    fn test_input_buffer_overflow() {
        let mut shell = new_shell();
        shell.set_echo(false);

        let large_input = vec![b'a'; 100];
        run(&mut shell, &large_input);
        assert!(shell.buffer().is_full());

        // The 101st keystroke is dropped, not echoed and not stored
        shell.set_echo(true);
        assert_eq!(run(&mut shell, b"x"), "");
        assert_eq!(shell.buffer().len(), 100);
        assert!(!shell.buffer().as_bytes().contains(&b'x'));
    }

    #[test]
    fn test_input_non_printable_characters() {
        let mut shell = new_shell();

        let echoed = run(&mut shell, &[0x01, 0x02, 0x1F, b'\n', 0x80]);
        assert_eq!(echoed, "");
        assert!(shell.buffer().is_empty());
    }

    #[test]
    fn test_command_execution() {
        let mut shell = new_shell();
        let mut port = MockPort::new();
        let mut platform = MockPlatform::default();

        for &byte in b"cls" {
            let outcome = shell.process_byte(byte, &mut port, &mut platform).unwrap();
            assert_eq!(outcome, None);
        }
        let outcome = shell.process_byte(b'\r', &mut port, &mut platform).unwrap();
        assert_eq!(outcome, Some(DispatchOutcome::Executed));
        assert!(outcome.unwrap().is_success());

        assert_eq!(shell.state(), State::Idle);
        assert!(shell.buffer().is_empty());
        assert!(!port.take_output().contains("Unrecognized"));
    }

    #[test]
    fn test_unknown_command() {
        let mut shell = new_shell();

        let out = run(&mut shell, b"bogus\r");
        assert_eq!(out, "> bogus\r\nUnrecognized command\r\n");
        assert_eq!(shell.state(), State::Idle);
    }

    #[test]
    fn test_prefix_is_not_a_command() {
        let mut shell = new_shell();

        let out = run(&mut shell, b"HEL\r");
        assert!(out.contains("Unrecognized command"));
    }

    #[test]
    fn test_too_many_parameters() {
        let mut shell = new_shell();
        shell.set_echo(false);

        let out = run(&mut shell, b"TEST2 1 2 3 4\r");
        assert_eq!(out, "Invalid parameter count\r\n");
    }

    #[test]
    fn test_help_request_does_not_execute() {
        let mut shell = new_shell();
        shell.set_echo(false);
        let mut port = MockPort::with_input(b"RESET ?\r");
        let mut platform = MockPlatform::default();

        shell.poll(&mut port, &mut platform).unwrap();
        assert_eq!(port.take_output(), "Reset the board\r\n");
        assert_eq!(platform.resets, 0);
    }

    #[test]
    fn test_empty_command() {
        let mut shell = new_shell();
        let mut port = MockPort::new();
        let mut platform = MockPlatform::default();

        let outcome = shell.process_byte(b'\r', &mut port, &mut platform).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(port.take_output(), "\r\n");
    }

    #[test]
    fn test_whitespace_only_command() {
        let mut shell = new_shell();

        let out = run(&mut shell, b"   \r");
        assert!(!out.contains("Unrecognized"));
    }

    #[test]
    fn test_space_only_lines_are_not_dispatched() {
        let mut shell = new_shell();
        shell.set_echo(false);
        let mut platform = MockPlatform::default();

        for line in [&b" \r"[..], b"  \r", b"   \r"] {
            let mut port = MockPort::with_input(line);
            let lines = shell.poll(&mut port, &mut platform).unwrap();
            assert_eq!(lines, 0);
            assert_eq!(port.take_output(), "");
        }
    }

    #[test]
    fn test_crlf_terminated_lines() {
        let mut shell = new_shell();
        shell.set_echo(false);
        let mut port = MockPort::with_input(b"test 0\r\ntest 0\r\n");
        let mut platform = MockPlatform::default();

        let lines = shell.poll(&mut port, &mut platform).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(port.take_output(), "Shell alive\r\nShell alive\r\n");
    }

    #[test]
    fn test_poll_drains_only_available_input() {
        let mut shell = new_shell();
        let mut port = MockPort::with_input(b"TE");
        let mut platform = MockPlatform::default();

        assert_eq!(shell.poll(&mut port, &mut platform).unwrap(), 0);
        assert_eq!(port.pending_input(), 0);
        assert_eq!(shell.state(), State::Editing);

        // Nothing ready: returns immediately
        assert_eq!(shell.poll(&mut port, &mut platform).unwrap(), 0);

        port.feed(b"ST 0\r");
        assert_eq!(shell.poll(&mut port, &mut platform).unwrap(), 1);
        assert!(port.take_output().ends_with("Shell alive\r\n"));
    }

    #[test]
    fn test_mixed_input_processing() {
        let mut shell = new_shell();

        // Type "tesx", backspace, "t 0", enter
        let mut input = b"tesx".to_vec();
        input.push(ASCII_BACKSPACE);
        input.extend_from_slice(b"t 0\r");

        let out = run(&mut shell, &input);
        assert!(out.starts_with("> tesx\r\n> tes"));
        assert!(out.ends_with("Shell alive\r\n"));
    }

    #[test]
    fn test_write_failure_propagates_and_resets_line() {
        let mut shell = new_shell();
        shell.set_echo(false);
        let mut port = MockPort::with_input(b"help\r");
        port.set_fail_writes(true);
        let mut platform = MockPlatform::default();

        assert_eq!(shell.poll(&mut port, &mut platform), Err(Error::WriteError));
        assert_eq!(shell.state(), State::Idle);
        assert!(shell.buffer().is_empty());
    }

    #[test]
    fn test_small_line_capacity() {
        let mut shell = Shell::<4>::with_line_capacity(&BUILTINS, &TICKS);
        shell.set_echo(false);

        let mut port = MockPort::with_input(b"CLSXX");
        let mut platform = MockPlatform::default();
        shell.poll(&mut port, &mut platform).unwrap();
        assert_eq!(shell.buffer().as_bytes(), b"CLSX");
        assert!(shell.buffer().is_full());
    }

    #[test]
    fn test_state_debug() {
        assert_eq!(format!("{:?}", State::Idle), "Idle");
        assert_eq!(format!("{:?}", State::Editing), "Editing");
        assert_eq!(format!("{:?}", State::Processing), "Processing");
    }

    #[test]
    fn test_default_prompt() {
        assert_eq!(DEFAULT_PROMPT, "> ");
    }
}
