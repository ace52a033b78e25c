//! In-memory catalog of commands keyed by identifier

use crate::commands::Command;
use crate::constants;
use crate::utils::validators;
use std::collections::HashMap;

/// Errors raised while registering a command
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A command with this identifier is already registered
    DuplicateIdentifier(String),
    /// Identifier is empty or not safe as a path segment
    InvalidIdentifier(String),
    /// Identifier collides with a built-in command
    ReservedIdentifier(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateIdentifier(id) => {
                write!(f, "Command '{}' is already registered", id)
            }
            RegistryError::InvalidIdentifier(id) => write!(
                f,
                "Invalid command identifier '{}': use letters, digits, '.', '_' or '-', starting with a letter or digit",
                id
            ),
            RegistryError::ReservedIdentifier(id) => {
                write!(f, "Command identifier '{}' is reserved", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of commands, preserving registration order
#[derive(Default)]
pub struct CommandsRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command to the registry
    ///
    /// Fails without touching existing entries if the identifier is invalid,
    /// reserved, or already taken.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<(), RegistryError> {
        let id = command.id().to_string();

        if !validators::is_valid_identifier(&id) {
            return Err(RegistryError::InvalidIdentifier(id));
        }
        if id == constants::commands::HELP {
            return Err(RegistryError::ReservedIdentifier(id));
        }
        if self.index.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentifier(id));
        }

        self.index.insert(id, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Get a command by identifier
    pub fn lookup(&self, id: &str) -> Option<&dyn Command> {
        self.index.get(id).map(|&i| self.commands[i].as_ref())
    }

    /// Get a mutable command by identifier, for flag configuration
    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut (dyn Command + 'static)> {
        match self.index.get(id) {
            Some(&i) => Some(self.commands[i].as_mut()),
            None => None,
        }
    }

    /// Identifier and description of every command, in registration order
    pub fn list(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .map(|cmd| (cmd.id().to_string(), cmd.description().to_string()))
            .collect()
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.commands.iter().map(|cmd| cmd.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    struct Named(&'static str, &'static str);

    impl Command for Named {
        fn id(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            self.1
        }

        fn exec(&self, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "{}", self.1)?;
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandsRegistry::new();
        registry.register(Box::new(Named("one", "first"))).unwrap();

        let cmd = registry.lookup("one").unwrap();
        assert_eq!(cmd.id(), "one");
        assert_eq!(cmd.description(), "first");
        assert!(registry.lookup("two").is_none());
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let mut registry = CommandsRegistry::new();
        registry.register(Box::new(Named("job", "original"))).unwrap();

        let err = registry
            .register(Box::new(Named("job", "impostor")))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIdentifier("job".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("job").unwrap().description(), "original");
    }

    #[test]
    fn test_rejects_invalid_and_reserved_identifiers() {
        let mut registry = CommandsRegistry::new();

        assert!(matches!(
            registry.register(Box::new(Named("", "empty"))),
            Err(RegistryError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            registry.register(Box::new(Named("../escape", "path"))),
            Err(RegistryError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            registry.register(Box::new(Named("help", "builtin"))),
            Err(RegistryError::ReservedIdentifier(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = CommandsRegistry::new();
        for (id, desc) in [("zeta", "z"), ("alpha", "a"), ("mid", "m")] {
            registry.register(Box::new(Named(id, desc))).unwrap();
        }

        assert_eq!(registry.ids(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            registry.list(),
            vec![
                ("zeta".to_string(), "z".to_string()),
                ("alpha".to_string(), "a".to_string()),
                ("mid".to_string(), "m".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RegistryError::DuplicateIdentifier("x".to_string()).to_string(),
            "Command 'x' is already registered"
        );
        assert!(
            RegistryError::ReservedIdentifier("help".to_string())
                .to_string()
                .contains("reserved")
        );
    }
}
