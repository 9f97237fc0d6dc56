use clap::Parser;
use folio::api::{ConfigAction, FolioApi, ImageSource, NewProject};
use folio::error::{FolioError, Result};
use folio::init::{data_dir, initialize};
use folio::model::Bucket;
use folio::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands, ImageCommands};
use cli::{print_config, print_messages, print_project_detail, print_projects};

const LOG_ENV: &str = "FOLIO_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("folio=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = initialize(data_dir()?)?;
    let mut api = ctx.api;

    match cli.command {
        Some(Commands::List) | None => handle_list(&api),
        Some(Commands::Show { id }) => handle_show(&api, &id),
        Some(Commands::Create {
            id,
            name,
            description,
            preview,
            upload,
        }) => {
            let project = NewProject {
                id,
                name,
                description,
                preview: preview.map(|p| image_source(p, upload)),
            };
            emit(api.create_project(project)?)
        }
        Some(Commands::Rename { id, name }) => emit(api.rename_project(&id, &name)?),
        Some(Commands::Describe { id, description }) => {
            emit(api.describe_project(&id, &description)?)
        }
        Some(Commands::Delete { id }) => emit(api.delete_project(&id)?),
        Some(Commands::Preview { id, image, upload }) => {
            emit(api.set_preview(&id, &image_source(image, upload))?)
        }
        Some(Commands::Image(cmd)) => handle_image(&mut api, cmd),
        Some(Commands::Move { id, position }) => {
            emit(api.move_project(&id, zero_based(position)?)?)
        }
        Some(Commands::Transfer { id, payload, at }) => {
            let at = at.map(zero_based).transpose()?;
            let result = match (id, payload) {
                (_, Some(json)) => api.transfer_payload(&json, at)?,
                (Some(id), None) => api.transfer_project(&id, at)?,
                (None, None) => return Err(FolioError::Api("Pass --id or --payload".into())),
            };
            emit(result)
        }
        Some(Commands::Payload { id, bucket, index }) => {
            let image = match (bucket, index) {
                (Some(bucket), Some(index)) => Some((bucket.parse::<Bucket>()?, zero_based(index)?)),
                _ => None,
            };
            emit(api.drag_payload(&id, image)?)
        }
        Some(Commands::Reindex) => emit(api.reconcile()?),
        Some(Commands::Save) => emit(api.save()?),
        Some(Commands::Cancel) => emit(api.cancel()?),
        Some(Commands::Status) => emit(api.status()?),
        Some(Commands::Export { dir, archive }) => emit(api.export(&dir, archive)?),
        Some(Commands::Page { id }) => emit(api.project_page(&id)?),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
    }
}

fn handle_list(api: &FolioApi<FsBackend>) -> Result<()> {
    let result = api.list_projects()?;
    print_projects(&result.listed_projects);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &FolioApi<FsBackend>, id: &str) -> Result<()> {
    let result = api.show_project(id)?;
    for listing in &result.listed_projects {
        print_project_detail(listing);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_image(api: &mut FolioApi<FsBackend>, cmd: ImageCommands) -> Result<()> {
    let result = match cmd {
        ImageCommands::Add {
            id,
            bucket,
            image,
            upload,
        } => api.add_image(&id, bucket.parse()?, &image_source(image, upload))?,
        ImageCommands::Rm { id, bucket, index } => {
            api.remove_image(&id, bucket.parse()?, zero_based(index)?)?
        }
        ImageCommands::Mv {
            id,
            from,
            index,
            to,
            at,
        } => api.move_image(
            &id,
            from.parse()?,
            zero_based(index)?,
            to.parse()?,
            at.map(zero_based).transpose()?,
        )?,
        ImageCommands::Drop {
            id,
            bucket,
            payload,
            at,
        } => api.drop_image(&payload, &id, bucket.parse()?, at.map(zero_based).transpose()?)?,
    };
    emit(result)
}

fn handle_config(
    api: &mut FolioApi<FsBackend>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Print command output (payload JSON, page HTML) verbatim, then messages.
fn emit(result: folio::commands::CmdResult) -> Result<()> {
    if let Some(output) = &result.output {
        println!("{}", output);
    }
    print_messages(&result.messages);
    Ok(())
}

fn image_source(value: String, upload: bool) -> ImageSource {
    if upload {
        ImageSource::Upload(PathBuf::from(value))
    } else {
        ImageSource::Reference(value)
    }
}

fn zero_based(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| FolioError::Api("Positions start at 1".into()))
}
