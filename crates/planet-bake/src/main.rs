/// Offline baker: loads a saved planet document and writes the lookup
/// textures the shading stage consumes, plus a manifest describing them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use planet_core::biome::{create_biome_texture, BIOME_TEXTURE_SIZE};
use planet_core::ramp::{create_ramp_texture, RAMP_TEXTURE_SIZE};
use planet_core::{PlanetData, RampKind, RgbaTexture};

#[derive(Parser, Debug)]
#[command(name = "planet-bake", about = "Bake planet lookup textures to raw RGBA8 files")]
struct Args {
    /// Planet JSON document. Defaults are used when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory, created if missing.
    #[arg(short, long, default_value = "data/baked")]
    output: PathBuf,

    #[arg(long, default_value_t = RAMP_TEXTURE_SIZE)]
    ramp_size: usize,

    #[arg(long, default_value_t = BIOME_TEXTURE_SIZE)]
    biome_size: usize,

    /// Also write the normalized planet document next to the textures.
    #[arg(long)]
    normalize: bool,
}

#[derive(Serialize)]
struct TextureEntry {
    name: String,
    file: String,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Manifest {
    source: Option<String>,
    textures: Vec<TextureEntry>,
}

fn load_planet(input: Option<&Path>) -> Result<PlanetData> {
    match input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PlanetData::load(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(PlanetData::default()),
    }
}

fn write_texture(dir: &Path, name: &str, texture: &RgbaTexture) -> Result<TextureEntry> {
    let file = format!("{name}.rgba");
    let path = dir.join(&file);
    fs::write(&path, texture.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Wrote {} ({}×{})", path.display(), texture.width, texture.height);
    Ok(TextureEntry { name: name.to_string(), file, width: texture.width, height: texture.height })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let planet = load_planet(args.input.as_deref())?;
    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    info!("baking into {}", args.output.display());

    let mut textures = Vec::new();
    for (name, kind) in [
        ("surface_ramp", RampKind::Surface),
        ("clouds_ramp", RampKind::Clouds),
        ("ring_ramp", RampKind::Ring),
    ] {
        let strip = create_ramp_texture(planet.ramp(kind).steps(), args.ramp_size);
        textures.push(write_texture(&args.output, name, &strip)?);
    }

    let biomes = create_biome_texture(planet.biomes.as_slice(), args.biome_size);
    textures.push(write_texture(&args.output, "biomes", &biomes)?);

    if args.normalize {
        let path = args.output.join("planet.json");
        fs::write(&path, planet.to_json()?).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    let manifest = Manifest {
        source: args.input.as_ref().map(|p| p.display().to_string()),
        textures,
    };
    let path = args.output.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Wrote {}", path.display());

    Ok(())
}
