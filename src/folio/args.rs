use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Edit the project carousel of a small portfolio site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects in carousel order
    #[command(alias = "ls")]
    List,

    /// Show one project with its image buckets
    Show { id: String },

    /// Create a new project
    #[command(alias = "n")]
    Create {
        /// Folder-style id (letters, digits, '-' and '_')
        id: String,

        /// Display name
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Preview image: a site path, or a local file with --upload
        #[arg(short, long)]
        preview: Option<String>,

        /// Treat --preview as a local file to compress and embed
        #[arg(long)]
        upload: bool,
    },

    /// Rename a project
    Rename { id: String, name: String },

    /// Replace a project's description
    Describe { id: String, description: String },

    /// Delete a project
    #[command(alias = "rm")]
    Delete { id: String },

    /// Set a project's preview image
    Preview {
        id: String,
        image: String,

        /// Treat IMAGE as a local file to compress and embed
        #[arg(long)]
        upload: bool,
    },

    /// Edit a project's image buckets
    #[command(subcommand)]
    Image(ImageCommands),

    /// Move a project's slide to POSITION (1-based)
    #[command(alias = "mv")]
    Move { id: String, position: usize },

    /// Drop a project from the folder list onto the carousel
    Transfer {
        /// Project id already known to the store
        #[arg(long, conflicts_with = "payload", required_unless_present = "payload")]
        id: Option<String>,

        /// Drag payload JSON, as printed by `folio payload`
        #[arg(long)]
        payload: Option<String>,

        /// Slot to insert before (1-based); end of the carousel when omitted
        #[arg(long)]
        at: Option<usize>,
    },

    /// Print the drag payload for a project, or for one of its images
    Payload {
        id: String,

        /// Bucket of the image to drag (photos, drawings, renders)
        #[arg(long, requires = "index")]
        bucket: Option<String>,

        /// Image number within the bucket (1-based)
        #[arg(long, requires = "bucket")]
        index: Option<usize>,
    },

    /// Recompute project order from the carousel
    Reindex,

    /// Save changes and make them the new rollback point
    Save,

    /// Discard every change since the last save
    Cancel,

    /// Summarize unsaved changes
    Status,

    /// Export projects.json and one page per project
    Export {
        /// Output directory
        dir: PathBuf,

        /// Write a single .tar.gz instead of loose files
        #[arg(long)]
        archive: bool,
    },

    /// Print the generated page for a project
    Page { id: String },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. site_title, image.quality)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Append an image to a bucket
    Add {
        id: String,
        bucket: String,
        image: String,

        /// Treat IMAGE as a local file to compress and embed
        #[arg(long)]
        upload: bool,
    },

    /// Remove image INDEX (1-based) from a bucket
    Rm {
        id: String,
        bucket: String,
        index: usize,
    },

    /// Move image INDEX (1-based) to another bucket, or within one
    Mv {
        id: String,
        from: String,
        index: usize,
        to: String,

        /// Position in the target bucket (1-based); end when omitted
        #[arg(long)]
        at: Option<usize>,
    },

    /// Drop an image drag payload onto a bucket
    Drop {
        id: String,
        bucket: String,

        /// Payload JSON, as printed by `folio payload --bucket --index`
        #[arg(long)]
        payload: String,

        #[arg(long)]
        at: Option<usize>,
    },
}
