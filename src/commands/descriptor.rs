//! Static command table.
//!
//! One table drives the registered platform schema, required-parameter
//! validation, the positional order of free-text parameters, and `help`.

use crate::commands::error::CommandError;
use crate::commands::parsed::ParsedCommand;

/// Type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Ordered: free-text tokens bind to parameters in this order.
    pub params: &'static [ParamDescriptor],
}

const fn string(name: &'static str, description: &'static str) -> ParamDescriptor {
    ParamDescriptor { name, kind: ParamKind::String, description, required: true }
}

const fn number(name: &'static str, description: &'static str) -> ParamDescriptor {
    ParamDescriptor { name, kind: ParamKind::Number, description, required: true }
}

/// Every supported command.
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "createwallet",
        description: "Create a new wallet",
        params: &[string("username", "The username for the new wallet")],
    },
    CommandDescriptor {
        name: "getpublickey",
        description: "Get public key from username",
        params: &[string("username", "The username to get the public key for")],
    },
    CommandDescriptor {
        name: "createtransaction",
        description: "Create a new transaction",
        params: &[
            number("amount", "The amount for the transaction"),
            string("payer", "The payer of the transaction"),
            string("payee", "The payee of the transaction"),
        ],
    },
    CommandDescriptor {
        name: "minepublickey",
        description: "Mine blocks for a wallet using public key",
        params: &[string("publickey", "The public key of the miner")],
    },
    CommandDescriptor {
        name: "mineusername",
        description: "Mine blocks for a wallet using username",
        params: &[string("username", "The username of the miner")],
    },
    CommandDescriptor {
        name: "checkbalancepublickey",
        description: "Check balance using public key",
        params: &[string("publickey", "The public key to check the balance for")],
    },
    CommandDescriptor {
        name: "balance",
        description: "Check balance using username",
        params: &[string("username", "The username to check the balance for")],
    },
    CommandDescriptor {
        name: "help",
        description: "List available commands",
        params: &[],
    },
];

/// Look up a command by its canonical (lowercase) name.
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

impl CommandDescriptor {
    /// Positional index of a parameter.
    pub fn position(&self, param: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == param)
    }

    /// Usage line, e.g. `!createtransaction <amount> <payer> <payee>`.
    pub fn usage(&self, prefix: char) -> String {
        let mut line = format!("{}{}", prefix, self.name);
        for p in self.params {
            line.push_str(&format!(" <{}>", p.name));
        }
        line
    }

    /// Check every required parameter is present and well-typed.
    pub fn validate(&self, cmd: &ParsedCommand) -> Result<(), CommandError> {
        for p in self.params.iter().filter(|p| p.required) {
            match p.kind {
                ParamKind::String if cmd.get_string(p.name).is_none() => {
                    return Err(CommandError::Validation(format!(
                        "Missing parameter `{}` for {}. Usage: {}",
                        p.name,
                        self.name,
                        self.usage_hint()
                    )));
                }
                ParamKind::Number if cmd.get_number(p.name).is_none() => {
                    return Err(CommandError::Validation(format!(
                        "Parameter `{}` must be a number. Usage: {}",
                        p.name,
                        self.usage_hint()
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn usage_hint(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|p| format!("<{}>", p.name)).collect();
        if params.is_empty() {
            self.name.to_string()
        } else {
            format!("{} {}", self.name, params.join(" "))
        }
    }
}

/// Body of the `help` reply.
pub fn help_text(prefix: char) -> String {
    let mut text = format!(
        "Use slash commands, or type `{}` followed by the command and its parameters in order.\n",
        prefix
    );
    for c in COMMANDS {
        text.push_str(&format!("\n`{}` {}", c.usage(prefix), c.description));
    }
    text
}
