// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Lumen Engine Sandbox
// Main binary for testing and demos

mod sandbox2d;
mod triangle;

use anyhow::Result;
use lumen_sdk::prelude::*;

use crate::sandbox2d::Sandbox2D;
use crate::triangle::TriangleLayer;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let spec = ApplicationSpecification::default()
        .with_name("Lumen Sandbox")
        .with_dimensions(1280, 720);
    let aspect_ratio = spec.width as f32 / spec.height as f32;

    lumen_sdk::run(spec, |app| {
        app.push_layer(Sandbox2D::new(aspect_ratio))?;
        app.push_layer(TriangleLayer::new(Vec3::new(0.0, 0.5, 0.5)))?;
        Ok(())
    })
}
