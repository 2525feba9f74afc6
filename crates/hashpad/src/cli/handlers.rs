//! Command handlers for the hashpad CLI.
//!
//! Stateful handlers follow the same shape: load the current document (the
//! equivalent of a page load), act through the API, flush pending work, then
//! persist the address file so the next invocation sees the result.

use super::render;
use anyhow::{bail, Context};
use hashpadapp::address::Address;
use hashpadapp::commands::load::decode_fragment;
use hashpadapp::config::HashpadConfig;
use hashpadapp::document::DocumentState;
use hashpadapp::fragment::{fragment_from_address, Fragment};
use hashpadapp::identity::DocumentId;
use hashpadapp::init::{data_dir, HashpadContext};
use hashpadapp::surface::EditableSurface;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

type Result<T> = anyhow::Result<T>;

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("could not read stdin")?;
            Ok(content)
        }
    }
}

pub fn new(ctx: &mut HashpadContext) -> Result<()> {
    ctx.api.new_document();
    ctx.persist()?;
    render::print_address(&ctx.api.current_address());
    Ok(())
}

pub fn write(ctx: &mut HashpadContext, file: Option<&Path>, style: Option<String>) -> Result<()> {
    let content = read_input(file)?;
    ctx.api.load();

    // Writing into nothing starts a document with an identity; legacy
    // fragments without one are left as they are.
    let session = ctx.api.session();
    if session.doc_id.is_none() && session.fragment.is_empty() {
        ctx.api.new_document();
    }

    let style = style.unwrap_or_else(|| ctx.api.surface().style());
    ctx.api
        .surface_mut()
        .render(&DocumentState::new(content, style));
    ctx.api.on_edit(Duration::ZERO);
    ctx.api.flush();
    ctx.persist()?;

    render::print_address(&ctx.api.current_address());
    Ok(())
}

pub fn show(ctx: &mut HashpadContext, with_style: bool) -> Result<()> {
    ctx.api.load();
    ctx.persist()?;

    let surface = ctx.api.surface();
    let style = surface.style();
    render::print_document(
        &ctx.api.title(),
        &surface.content(),
        with_style.then_some(style.as_str()),
    );
    Ok(())
}

pub fn open(ctx: &mut HashpadContext, address: &str) -> Result<()> {
    let fragment = fragment_from_address(address);
    if fragment.is_empty() {
        bail!("no document in {:?}", address);
    }
    // Reject before navigating; a bad link should not replace the current document.
    decode_fragment(fragment)?;

    ctx.api.address_mut().push(fragment);
    ctx.api.load();
    ctx.persist()?;

    render::print_opened(&ctx.api.title(), &ctx.api.current_address());
    Ok(())
}

pub fn title(ctx: &mut HashpadContext) -> Result<()> {
    ctx.api.load();
    ctx.persist()?;
    println!("{}", ctx.api.title());
    Ok(())
}

pub fn export(ctx: &mut HashpadContext, dir: Option<PathBuf>) -> Result<()> {
    ctx.api.load();
    ctx.persist()?;

    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let path = ctx.api.export().write_to(&dir)?;
    render::print_exported(&path);
    Ok(())
}

pub fn encode(
    file: Option<&Path>,
    style: Option<String>,
    id: Option<String>,
    new_id: bool,
) -> Result<()> {
    let content = read_input(file)?;
    let config = HashpadConfig::load(&data_dir()?)?;

    let docid = match (id, new_id) {
        (Some(id), _) => DocumentId::parse(&id)?.to_string(),
        (None, true) => DocumentId::generate().to_string(),
        (None, false) => String::new(),
    };
    let data = DocumentState::new(content, style.unwrap_or_default())
        .encode(config.compression_level)?;

    render::print_address(&config.address_for(&Fragment::new(data, docid).build()));
    Ok(())
}

pub fn decode(address: &str, json: bool) -> Result<()> {
    let fragment = Fragment::parse(fragment_from_address(address));
    let state = DocumentState::decode(&fragment.data)?;

    if json {
        println!("{}", render::decoded_json(&state, &fragment.docid)?);
    } else {
        print!("{}", state.content);
    }
    Ok(())
}
