// Copyright 2020 TwoCookingMice

use raylume::core::scene_loader::load_scene;
use raylume::core::texture::FilterMode;
use raylume::integrators::direct::DirectIntegrator;

use anyhow::Context;
use std::env;
use std::process;

fn usage(program: &str) {
    eprintln!("Usage: {} <scene.json> <output.png|jpg|exr> <nearest|bilinear|0|1>", program);
}

fn run(scene_path: &str, output_path: &str, filter: FilterMode) -> anyhow::Result<()> {
    let scene = load_scene(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path))?;

    let mut integrator = DirectIntegrator::new(scene, filter);
    let elapsed = integrator.render();
    println!("Render Time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    integrator.output_image().save(output_path)
        .with_context(|| format!("failed to save output image {}", output_path))?;
    log::info!("Wrote {}.", output_path);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        usage(&args[0]);
        process::exit(1);
    }

    let filter = match args[3].parse::<FilterMode>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = run(&args[1], &args[2], filter) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
