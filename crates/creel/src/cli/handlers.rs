//! Per-command handlers: build inputs from arguments, call the API, print results.

use super::render;
use super::setup::{CatchArgs, FilterArgs};
use creelapp::api::CreelApi;
use creelapp::commands::{CatchInput, CmdResult};
use creelapp::config::CreelConfig;
use creelapp::error::{CreelError, Result};
use creelapp::model::Field;
use creelapp::photos::PhotoUpload;
use creelapp::query::{criteria, Criteria};
use creelapp::store::fs_backend::FsBackend;
use std::fs;
use std::path::{Path, PathBuf};

type Api = CreelApi<FsBackend>;

pub fn add(api: &mut Api, args: CatchArgs, photo: Option<PathBuf>) -> Result<()> {
    let input = apply(api.new_input(), args);
    let upload = read_photo(photo.as_deref())?;
    let result = api.add_catch(input, upload.as_ref())?;
    print_modification(&result);
    Ok(())
}

pub fn edit(api: &mut Api, selector: &str, args: CatchArgs, photo: Option<PathBuf>) -> Result<()> {
    let input = apply(api.edit_input(selector)?, args);
    let upload = read_photo(photo.as_deref())?;
    let result = api.edit_catch(selector, input, upload.as_ref())?;
    print_modification(&result);
    Ok(())
}

pub fn delete(api: &mut Api, selector: &str) -> Result<()> {
    let result = api.delete_catch(selector)?;
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

pub fn list(api: &mut Api, filters: FilterArgs, json: bool) -> Result<()> {
    let result = api.list_catches(&to_criteria(filters))?;
    if json {
        let text =
            render::list_json(&result.listed_records).map_err(|e| CreelError::Api(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }
    print!("{}", render::render_list(&result.listed_records));
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

pub fn view(api: &mut Api, selector: &str) -> Result<()> {
    let result = api.view_catch(selector)?;
    for dr in &result.listed_records {
        let photo = photo_path(api, &dr.record.photo_file);
        print!("{}", render::render_record(dr, photo.as_deref()));
    }
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

pub fn stats(api: &mut Api) -> Result<()> {
    let result = api.stats()?;
    print!("{}", render::render_stats(&result.stats));
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

pub fn photos(api: &mut Api, filters: FilterArgs) -> Result<()> {
    let result = api.gallery(&to_criteria(filters))?;
    let api: &Api = api;
    let entries: Vec<_> = result
        .listed_records
        .iter()
        .map(|dr| {
            let path = photo_path(api, &dr.record.photo_file)
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            (dr.clone(), path)
        })
        .collect();
    print!("{}", render::render_gallery(&entries));
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

pub fn export(api: &mut Api, output: &Path) -> Result<()> {
    let result = api.export()?;
    if let Some(bytes) = &result.export {
        fs::write(output, bytes)?;
    }
    print!("{}", render::render_messages(&result.messages));
    println!("Written to {}", output.display());
    Ok(())
}

pub fn show_config(api: &Api, config_error: Option<&str>) {
    let paths = api.paths();
    let config = api.config();
    println!("data_dir = {}", paths.data_dir.display());
    println!("table = {}", paths.table.display());
    println!("photos = {}", paths.photos.display());
    println!("config_file = {}", paths.config.display());
    println!();
    println!("table_file = {:?}", config.table_file);
    println!("photos_dir = {:?}", config.photos_dir);
    println!("default_species = {:?}", config.default_species);
    println!("default_spot = {:?}", config.default_spot);
    if let Some(err) = config_error {
        eprintln!("Warning: {} (defaults shown)", err);
    }
}

pub fn config_template() {
    print!("{}", CreelConfig::template());
}

fn print_modification(result: &CmdResult) {
    print!("{}", render::render_messages(&result.messages));
    if result.unsaved {
        print!("{}", render::render_list(&result.affected_records));
    }
}

fn read_photo(path: Option<&Path>) -> Result<Option<PhotoUpload>> {
    path.map(PhotoUpload::from_path).transpose()
}

fn photo_path(api: &Api, reference: &str) -> Option<PathBuf> {
    (!reference.trim().is_empty()).then(|| api.paths().data_dir.join(reference))
}

/// Overlays the given arguments on a prefilled input.
fn apply(mut input: CatchInput, args: CatchArgs) -> CatchInput {
    if let Some(v) = args.date {
        input.date = v;
    }
    if let Some(v) = args.time {
        input.time = v;
    }
    if let Some(v) = args.species {
        input.species = v;
    }
    if let Some(v) = args.length_cm {
        input.length_cm = v;
    }
    if let Some(v) = args.weight {
        input.weight = v;
    }
    if let Some(v) = args.unit {
        input.weight_unit = v;
    }
    if let Some(v) = args.spot {
        input.spot = v;
    }
    if let Some(v) = args.lure_type {
        input.lure_type = v;
    }
    if let Some(v) = args.lure_name {
        input.lure_name = v;
    }
    if let Some(v) = args.conditions {
        input.conditions = v;
    }
    if let Some(v) = args.released {
        input.released = v;
    }
    if let Some(v) = args.comment {
        input.comment = v;
    }
    input
}

fn to_criteria(filters: FilterArgs) -> Criteria {
    let named = filters
        .species
        .into_iter()
        .map(|v| (Field::Species, v))
        .chain(filters.spot.into_iter().map(|v| (Field::Spot, v)))
        .chain(filters.lure_name.into_iter().map(|v| (Field::LureName, v)));
    criteria(named.chain(filters.conditions))
}
