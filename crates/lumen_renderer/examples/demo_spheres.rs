//! Demo scene stand-in for a host application.
//!
//! Builds a small sphere-and-mesh arrangement, renders it through the
//! public entry points, and writes a gamma-corrected PPM file.

use std::fs::File;
use std::io::{BufWriter, Write};

use lumen_renderer::{
    color_to_rgb8, render_full, Camera, Color, Material, Mesh, RenderConfig, Scene, Sphere, Vec3,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene = build_scene()?;

    let mut camera = Camera::new()
        .with_resolution(800, 450)
        .with_quality(50, 10)
        .with_position(
            Vec3::new(0.0, 1.2, 2.5),
            Vec3::new(0.0, 0.3, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(45.0, 0.6, 3.5);
    camera.initialize();

    let config = RenderConfig::default();

    log::info!("rendering demo scene ({} primitives)", scene.len());
    let start = std::time::Instant::now();

    let width = camera.image_width;
    let mut image = vec![Color::ZERO; (camera.image_width * camera.image_height) as usize];
    render_full(&camera, &scene, &config, |x, y, color| {
        image[(y * width + x) as usize] = color;
    });

    log::info!("rendered in {:.2?}", start.elapsed());

    save_ppm(&image, camera.image_width, camera.image_height, "demo.ppm")?;
    log::info!("saved demo.ppm");

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    // Ground
    scene.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Material::Diffuse {
            albedo: Color::new(0.5, 0.5, 0.5),
        },
    ));

    // Three feature spheres: diffuse, glass, metal
    scene.add(Sphere::new(
        Vec3::new(-1.1, 0.0, -1.2),
        0.5,
        Material::Diffuse {
            albedo: Color::new(0.8, 0.2, 0.2),
        },
    ));
    scene.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Material::Dielectric {
            albedo: Color::ONE,
            refractive_index: 1.5,
        },
    ));
    scene.add(Sphere::new(
        Vec3::new(1.1, 0.0, -1.2),
        0.5,
        Material::Metallic {
            albedo: Color::new(0.7, 0.7, 0.8),
        },
    ));

    // A small mesh pyramid behind the spheres, imported the way a scene
    // front end would deliver it: positions plus 1-based face triples.
    let pyramid = Mesh {
        positions: vec![
            Vec3::new(-0.6, 0.0, -2.6),
            Vec3::new(0.6, 0.0, -2.6),
            Vec3::new(0.6, 0.0, -3.6),
            Vec3::new(-0.6, 0.0, -3.6),
            Vec3::new(0.0, 1.0, -3.1),
        ],
        normals: None,
        faces: vec![[1, 2, 5], [2, 3, 5], [3, 4, 5], [4, 1, 5]],
    };
    let triangles = pyramid.into_triangles(Material::Diffuse {
        albedo: Color::new(0.2, 0.4, 0.8),
    })?;
    scene.add_all(triangles);

    Ok(scene)
}

fn save_ppm(image: &[Color], width: u32, height: u32, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for color in image {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}
