use anyhow::Result;
use cli_command::commands::{CustomWriterDemo, PanicDemo, SayHello, SayHelloDynamic};
use cli_command::{Command, CommandsRegistry, LockableCommand, Settings, bootstrap};
use std::io;

fn build_registry(settings: &Settings) -> Result<CommandsRegistry> {
    let mut registry = CommandsRegistry::new();

    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(SayHello),
        // Run two of these at once to see the second one skip.
        Box::new(LockableCommand::new(
            SayHelloDynamic::new(),
            settings.lock_dir(),
        )),
        Box::new(PanicDemo),
        Box::new(CustomWriterDemo),
    ];

    for command in commands {
        registry.register(command)?;
    }

    Ok(registry)
}

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    if let Some(color) = settings.color {
        colored::control::set_override(color);
    }

    let mut registry = build_registry(&settings)?;

    // Drop the program name; the first remaining argument names the command.
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let mut stdout = io::stdout().lock();
    bootstrap(&args, &mut registry, &mut stdout, |code| {
        std::process::exit(code)
    });

    Ok(())
}
