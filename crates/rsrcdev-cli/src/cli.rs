mod resources;

use clap::Parser;

/// Inspects and edits classic Mac resource files.
#[derive(Parser)]
#[clap(name = "rsrcdev", version)]
pub(crate) struct Cli {
    /// Print debug output from the resource library.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Cmd,
}

impl Cli {
    pub(crate) fn verbose(&self) -> bool {
        self.verbose
    }

    pub(crate) fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            Cmd::Types(types) => types.run()?,
            Cmd::List(list) => list.run()?,
            Cmd::Dump(dump) => dump.run()?,
            Cmd::Extract(extract) => extract.run()?,
            Cmd::Replace(replace) => replace.run()?,
        }
        Ok(())
    }
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Lists the resource types present in a file.
    #[clap(name = "types")]
    Types(resources::ListTypes),

    /// Lists resources, optionally of a single type.
    #[clap(name = "list", visible_alias = "ls")]
    List(resources::ListResources),

    /// Dumps the hexadecimal content of a resource.
    #[clap(name = "dump")]
    Dump(resources::DumpResource),

    /// Writes the raw payload of a resource to a file or stdout.
    #[clap(name = "extract")]
    Extract(resources::ExtractResource),

    /// Replaces the payload of a resource with the contents of a file.
    #[clap(name = "replace")]
    Replace(resources::ReplaceResource),
}
