use std::{fs, io::Write, path::Path};

use anyhow::Context as _;
use rsrcdev::{
    resources::{Resource, ResourceType, file::RsrcFile},
    utils::debug::hex_dump_to,
};

fn open(path: &Path) -> anyhow::Result<RsrcFile> {
    RsrcFile::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

/// The types in a file, each with the number of resources it holds.
pub(crate) fn list_types(path: &Path) -> anyhow::Result<Vec<(ResourceType, usize)>> {
    let file = open(path)?;
    Ok(file
        .list_types()
        .into_iter()
        .map(|res_type| (res_type, file.list_resources(res_type).len()))
        .collect())
}

/// Each resource in a file together with its payload length.
pub(crate) fn list_resources(
    path: &Path,
    res_type: Option<ResourceType>,
) -> anyhow::Result<Vec<(Resource, usize)>> {
    let file = open(path)?;
    let mut entries = Vec::new();
    for res in file
        .table()
        .iter()
        .filter(|res| res_type.is_none_or(|res_type| res.res_type() == res_type))
    {
        let range = file.offset_range(res.id(), res.res_type())?;
        entries.push((*res, range.length()));
    }
    Ok(entries)
}

pub(crate) fn dump_resource(
    path: &Path,
    res_type: ResourceType,
    id: u16,
    output: impl Write,
) -> anyhow::Result<()> {
    let file = open(path)?;
    let data = file.read_data(id, res_type)?;
    hex_dump_to(output, &data, 0)?;
    Ok(())
}

pub(crate) fn extract_resource(
    path: &Path,
    res_type: ResourceType,
    id: u16,
    mut output: impl Write,
) -> anyhow::Result<usize> {
    let file = open(path)?;
    let data = file.read_data(id, res_type)?;
    output.write_all(&data)?;
    output.flush()?;
    Ok(data.len())
}

/// What a replacement did, or would do on a dry run.
#[derive(Debug)]
pub(crate) struct ReplaceSummary {
    pub(crate) old_len: usize,
    pub(crate) new_len: usize,
    pub(crate) old_header_offset: u32,
    pub(crate) new_header_offset: u32,
}

pub(crate) struct ReplaceOptions<'a> {
    pub(crate) output: Option<&'a Path>,
    pub(crate) backup: bool,
    pub(crate) dry_run: bool,
}

pub(crate) fn replace_resource(
    path: &Path,
    res_type: ResourceType,
    id: u16,
    data_path: &Path,
    options: &ReplaceOptions<'_>,
) -> anyhow::Result<ReplaceSummary> {
    let mut file = open(path)?;
    let new_data = fs::read(data_path)
        .with_context(|| format!("Failed to read {}", data_path.display()))?;
    let old_len = file.offset_range(id, res_type)?.length();
    let old_header_offset = file.header_offset();

    file.replace_data(id, res_type, &new_data)?;
    let summary = ReplaceSummary {
        old_len,
        new_len: new_data.len(),
        old_header_offset,
        new_header_offset: file.header_offset(),
    };

    if !options.dry_run {
        let target = options.output.unwrap_or(path);
        file.save(target, options.backup)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }
    Ok(summary)
}
