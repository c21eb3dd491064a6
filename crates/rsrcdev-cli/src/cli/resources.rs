use std::{collections::BTreeMap, fs::File, io::BufWriter, path::PathBuf};

use clap::{Parser, builder::TypedValueParser};
use itertools::Itertools as _;
use rsrcdev::resources::ResourceType;

use crate::cmds::resources::{
    ReplaceOptions, dump_resource, extract_resource, list_resources, list_types, replace_resource,
};

static RESOURCE_NAME_MAP: std::sync::LazyLock<BTreeMap<String, ResourceType>> =
    std::sync::LazyLock::new(|| {
        let aliases = [
            ("picture", ResourceType::Pict),
            ("sound", ResourceType::Snd),
            ("string", ResourceType::Str),
            ("template", ResourceType::Tmpl),
            ("version", ResourceType::Vers),
        ];
        ResourceType::ALL
            .into_iter()
            .map(|res_type| (res_type.name().to_ascii_lowercase(), res_type))
            .chain(
                aliases
                    .into_iter()
                    .map(|(name, res_type)| (name.to_owned(), res_type)),
            )
            .collect()
    });

fn parse_resource_type() -> clap::builder::ValueParser {
    let possible_values =
        clap::builder::PossibleValuesParser::new(RESOURCE_NAME_MAP.keys().map(String::as_str));
    possible_values
        .map(|s| RESOURCE_NAME_MAP[&s.to_ascii_lowercase()])
        .into()
}

/// Lists the resource types present in a file.
#[derive(Parser)]
pub(super) struct ListTypes {
    /// Path to the resource file.
    file: PathBuf,
}

impl ListTypes {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        for (res_type, count) in list_types(&self.file)? {
            println!("{res_type:<4}  {count} resource(s)");
        }
        Ok(())
    }
}

/// Lists resources, optionally of a single type.
#[derive(Parser)]
pub(super) struct ListResources {
    /// Path to the resource file.
    file: PathBuf,

    /// Only list resources of this type (e.g., PICT, snd, STR).
    #[clap(long = "type", short = 't', ignore_case = true, value_parser = parse_resource_type())]
    res_type: Option<ResourceType>,
}

impl ListResources {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let entries = list_resources(&self.file, self.res_type)?;
        for (res_type, group) in &entries.iter().chunk_by(|(res, _)| res.res_type()) {
            let ids = group
                .map(|(res, len)| format!("{}:{len}", res.id()))
                .join(" ");
            println!("{res_type:<4}  {ids}");
        }
        Ok(())
    }
}

/// Dumps the hexadecimal content of a resource.
#[derive(Parser)]
pub(super) struct DumpResource {
    /// Path to the resource file.
    file: PathBuf,

    /// The type of the resource to dump.
    #[clap(long = "type", short = 't', ignore_case = true, value_parser = parse_resource_type())]
    res_type: ResourceType,

    /// The ID of the resource to dump.
    id: u16,
}

impl DumpResource {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        dump_resource(
            &self.file,
            self.res_type,
            self.id,
            std::io::stdout().lock(),
        )
    }
}

/// Writes the raw payload of a resource to a file or stdout.
#[derive(Parser)]
pub(super) struct ExtractResource {
    /// Path to the resource file.
    file: PathBuf,

    /// The type of the resource to extract.
    #[clap(long = "type", short = 't', ignore_case = true, value_parser = parse_resource_type())]
    res_type: ResourceType,

    /// The ID of the resource to extract.
    id: u16,

    /// File to write the payload to. Defaults to stdout.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}

impl ExtractResource {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        if let Some(output) = &self.output {
            let out = BufWriter::new(File::create(output)?);
            let written = extract_resource(&self.file, self.res_type, self.id, out)?;
            eprintln!(
                "Wrote {written} bytes of {}:{} to {}",
                self.res_type,
                self.id,
                output.display()
            );
        } else {
            extract_resource(&self.file, self.res_type, self.id, std::io::stdout().lock())?;
        }
        Ok(())
    }
}

/// Replaces the payload of a resource with the contents of a file.
#[derive(Parser)]
pub(super) struct ReplaceResource {
    /// Path to the resource file.
    file: PathBuf,

    /// The type of the resource to replace.
    #[clap(long = "type", short = 't', ignore_case = true, value_parser = parse_resource_type())]
    res_type: ResourceType,

    /// The ID of the resource to replace.
    id: u16,

    /// File holding the new payload.
    data_file: PathBuf,

    /// Write the result here instead of over the input file.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Keep a copy of the file being overwritten as `<file>.bak`, unless one
    /// already exists.
    #[clap(long)]
    backup: bool,

    /// Prints what would be done without writing anything.
    #[clap(short = 'n', long, default_value = "false")]
    dry_run: bool,
}

impl ReplaceResource {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let summary = replace_resource(
            &self.file,
            self.res_type,
            self.id,
            &self.data_file,
            &ReplaceOptions {
                output: self.output.as_deref(),
                backup: self.backup,
                dry_run: self.dry_run,
            },
        )?;
        let target = self.output.as_ref().unwrap_or(&self.file);
        eprintln!(
            "{prefix}Replaced {restype}:{id} ({old} -> {new} bytes), header {old_hdr:#x} -> {new_hdr:#x}, in {target}",
            prefix = if self.dry_run { "DRY_RUN: " } else { "" },
            restype = self.res_type,
            id = self.id,
            old = summary.old_len,
            new = summary.new_len,
            old_hdr = summary.old_header_offset,
            new_hdr = summary.new_header_offset,
            target = target.display(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(arg: &str) -> Result<ResourceType, clap::Error> {
        let cmd = clap::Command::new("test").arg(
            clap::Arg::new("type")
                .long("type")
                .ignore_case(true)
                .value_parser(parse_resource_type()),
        );
        let matches = cmd.try_get_matches_from(["test", "--type", arg])?;
        Ok(*matches.get_one::<ResourceType>("type").unwrap())
    }

    #[test]
    fn resource_types_parse_by_name_and_alias() {
        assert_eq!(parse_type("PICT").unwrap(), ResourceType::Pict);
        assert_eq!(parse_type("snd").unwrap(), ResourceType::Snd);
        assert_eq!(parse_type("Sound").unwrap(), ResourceType::Snd);
        assert_eq!(parse_type("tmpl").unwrap(), ResourceType::Tmpl);
    }

    #[test]
    fn unknown_resource_type_is_rejected() {
        assert!(parse_type("nope").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory as _;
        crate::cli::Cli::command().debug_assert();
    }
}
