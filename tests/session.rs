use shell_kit::{CommandSpec, Flow, Shell, ShellConfig, ShellError};
use std::io::Write;

/// Feeds `lines` to `shell` the way the interactive loop does and returns the
/// collected output, stopping early if a command asks to exit.
fn session(shell: &mut Shell, lines: &[&str]) -> Result<(String, Flow), ShellError> {
    let mut out = Vec::new();
    let mut flow = Flow::Continue;
    for line in lines {
        flow = shell.execute_line(line, &mut out)?;
        if flow == Flow::Exit {
            break;
        }
    }
    Ok((String::from_utf8(out).expect("utf8"), flow))
}

#[test]
fn test_variables_round_trip_through_builtins() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    let (out, flow) = session(
        &mut shell,
        &[
            r#"gset greeting "hello world""#,
            "gget greeting",
            "gget missing",
            "gset copy $greeting",
            "gget copy",
        ],
    )?;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(
        out,
        "greeting => hello world\n\
         greeting => hello world\n\
         missing is not set.\n\
         copy => hello world\n\
         copy => hello world\n"
    );
    Ok(())
}

#[test]
fn test_gsets_lists_in_insertion_order() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    let (out, _) = session(&mut shell, &["gsets", "gset a 1", "gset bb 22", "gsets"])?;

    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("No environment variables set."));
    assert_eq!(lines.next(), Some("a => 1"));
    assert_eq!(lines.next(), Some("bb => 22"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Name   Value"));
    assert_eq!(lines.next(), Some("----   -----"));
    assert_eq!(lines.next(), Some("a      1"));
    assert_eq!(lines.next(), Some("bb     22"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), None);
    Ok(())
}

#[test]
fn test_unknown_command_does_not_end_session() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    let (out, flow) = session(&mut shell, &["foo", "", "gset k v"])?;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(out, "foo: command not found\nk => v\n");
    Ok(())
}

#[test]
fn test_exit_stops_before_remaining_lines() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    let (out, flow) = session(&mut shell, &["gset a 1", "exit now", "gset b 2"])?;

    assert_eq!(flow, Flow::Exit);
    assert_eq!(out, "a => 1\n");
    assert_eq!(shell.vars().get_var("b"), None);
    Ok(())
}

#[test]
fn test_escaped_reference_is_not_expanded() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    let (out, _) = session(&mut shell, &["gset HOME /root", r"gset literal \$HOME", "gget literal"])?;

    assert_eq!(out, "HOME => /root\nliteral => $HOME\nliteral => $HOME\n");
    Ok(())
}

#[test]
fn test_custom_commands_see_arguments_and_session() -> Result<(), ShellError> {
    let echo = CommandSpec::from_fn(|args, _shell, out| {
        writeln!(out, "{}", args.join("|"))?;
        Ok(Flow::Continue)
    })
    .with_help("Prints its arguments.");
    let config = ShellConfig::default()
        .with_prompt(">>> ")
        .with_command("echo", echo);
    let mut shell = Shell::new(config);
    assert_eq!(shell.prompt(), ">>> ");

    let (out, _) = session(
        &mut shell,
        &["gset x 42", r#"echo $x "two words" 'it\'s' unset:$nope"#, "help echo"],
    )?;

    assert_eq!(
        out,
        "x => 42\n42|two words|it's|unset:\necho => Prints its arguments.\n\n"
    );
    Ok(())
}

#[test]
fn test_help_lists_user_commands_after_builtins() -> Result<(), ShellError> {
    let mut shell = Shell::default();
    shell.set_commands([("zzz", CommandSpec::from_fn(|_, _, _| Ok(Flow::Continue)))]);

    let (out, _) = session(&mut shell, &["help"])?;
    let listed: Vec<&str> = out
        .lines()
        .skip(3)
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(listed, ["exit", "clear", "gset", "gget", "gsets", "help", "zzz"]);
    assert!(out.contains("  zzz         No help message.\n"));
    Ok(())
}

#[test]
fn test_independent_sessions_do_not_share_state() -> Result<(), ShellError> {
    let mut first = Shell::default();
    let mut second = Shell::default();

    session(&mut first, &["gset only_here 1"])?;
    let (out, _) = session(&mut second, &["gget only_here"])?;

    assert_eq!(out, "only_here is not set.\n");
    Ok(())
}
