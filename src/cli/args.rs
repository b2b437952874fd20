//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{Key, Order};

/// Full binary tree engine: level-order insertion, deepest-node deletion, traversals and binary snapshots
#[derive(Parser, Debug)]
#[command(name = "fbtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Snapshot file (default: tree_file from settings)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert keys in level order
    Insert {
        /// Keys to insert
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<Key>,
    },

    /// Delete one node per key (missing keys are skipped)
    Delete {
        /// Keys to delete
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<Key>,
    },

    /// Print whether the key is present
    Member {
        #[arg(allow_negative_numbers = true)]
        key: Key,
    },

    /// Print the key if present, an empty line otherwise
    Get {
        #[arg(allow_negative_numbers = true)]
        key: Key,
    },

    /// Print keys in traversal order
    Print {
        /// Traversal order
        #[arg(short, long, value_enum, default_value_t = OrderArg::Level)]
        order: OrderArg,
    },

    /// Show node structure as tree
    Show,

    /// Show node count, depth and fullness
    Info,

    /// Print the encoded snapshot as hex
    Dump {
        /// Write raw snapshot bytes to stdout instead
        #[arg(long)]
        raw: bool,
    },

    /// Remove all nodes
    Clear {
        /// Delete the snapshot file instead of saving an empty tree
        #[arg(long)]
        purge: bool,
    },

    /// Print effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Traversal order accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    Level,
}

impl From<OrderArg> for Order {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Pre => Order::Pre,
            OrderArg::In => Order::In,
            OrderArg::Post => Order::Post,
            OrderArg::Level => Order::Level,
        }
    }
}
