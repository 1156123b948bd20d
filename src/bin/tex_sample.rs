// Copyright @yucwang 2026

use raylume::core::texture::{FilterMode, Texture};
use raylume::math::constants::Vector2f;
use std::env;
use std::process;

fn usage(program: &str) {
    eprintln!("Usage: {} <texture.exr/png/jpg> <u> <v>", program);
}

fn parse_coordinate(name: &str, value: &str) -> Result<f32, String> {
    match value.parse::<f32>() {
        Ok(c) if c.is_finite() => Ok(c),
        Ok(c) => Err(format!("invalid {} coordinate '{}': {} is not finite", name, value, c)),
        Err(e) => Err(format!("invalid {} coordinate '{}': {}", name, value, e)),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        usage(&args[0]);
        process::exit(1);
    }

    let path = &args[1];
    let (u, v) = match (parse_coordinate("u", &args[2]), parse_coordinate("v", &args[3])) {
        (Ok(u), Ok(v)) => (u, v),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{}", e);
            usage(&args[0]);
            process::exit(1);
        }
    };

    let tex = match Texture::from_file(path) {
        Ok(tex) => tex,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let uv = Vector2f::new(u, v);
    println!("texture: {} ({}x{}, {:?})", path, tex.width(), tex.height(), tex.format());
    println!("uv = ({:.6}, {:.6})", u, v);
    for filter in [FilterMode::Nearest, FilterMode::Bilinear].iter() {
        let c = tex.fetch(uv, *filter);
        println!("{:<8}: R {:.6}, G {:.6}, B {:.6}", filter.to_string(), c[0], c[1], c[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("u", "0.25"), Ok(0.25));
        assert_eq!(parse_coordinate("v", "-1"), Ok(-1.0));

        let err = parse_coordinate("u", "abc").unwrap_err();
        assert!(err.contains("invalid u coordinate 'abc'"));
        assert!(parse_coordinate("v", "").is_err());
        assert!(parse_coordinate("v", "NaN").is_err());
    }
}
