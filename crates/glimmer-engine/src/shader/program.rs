use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use glimmer_shader::ShaderSource;

use crate::driver::{ProgramId, ShaderStage, UniformLocation};
use crate::gl::{GlContext, GlError};
use crate::paint::Color;
use crate::{gl_assert, gl_call};

use super::compile_stage;

/// A linked vertex + fragment program.
///
/// The stage objects live only until the link completes; the program object is
/// deleted on drop.
pub struct Program {
    ctx: Rc<GlContext>,
    id: ProgramId,
    uniforms: RefCell<HashMap<String, Option<UniformLocation>>>,
}

impl Program {
    /// Compiles both stages and links them into a new program.
    pub fn from_sources(ctx: &Rc<GlContext>, vertex: &str, fragment: &str) -> Result<Self, GlError> {
        let driver = ctx.driver();
        let id = gl_call!(driver, create_program()).map_err(GlError::create("shader program"))?;

        // Owned from here on, so early returns delete the program object.
        let program = Self { ctx: Rc::clone(ctx), id, uniforms: RefCell::new(HashMap::new()) };

        let vs = compile_stage(driver, ShaderStage::Vertex, vertex)?;
        let fs = match compile_stage(driver, ShaderStage::Fragment, fragment) {
            Ok(fs) => fs,
            Err(err) => {
                gl_call!(driver, delete_shader(vs));
                return Err(err);
            }
        };

        gl_call!(driver, attach_shader(id, vs));
        gl_call!(driver, attach_shader(id, fs));
        gl_call!(driver, link_program(id));

        for stage in [vs, fs] {
            gl_call!(driver, detach_shader(id, stage));
            gl_call!(driver, delete_shader(stage));
        }

        if !gl_call!(driver, program_link_status(id)) {
            let log = gl_call!(driver, program_info_log(id));
            log::error!("error linking shader program:\n{}", log.trim_end());
            return Err(GlError::Link { log });
        }

        gl_call!(driver, validate_program(id));
        if !gl_call!(driver, program_validate_status(id)) {
            // Validation is relative to the current GL state, so it only warns.
            let log = gl_call!(driver, program_info_log(id));
            log::warn!("shader program {} failed validation: {}", id.get(), log.trim_end());
        }

        log::debug!("linked shader program {}", id.get());
        Ok(program)
    }

    pub fn from_source(ctx: &Rc<GlContext>, source: &ShaderSource) -> Result<Self, GlError> {
        Self::from_sources(ctx, &source.vertex, &source.fragment)
    }

    /// Reads a `#shader` file and builds a program from it.
    pub fn from_file(ctx: &Rc<GlContext>, path: impl AsRef<Path>) -> Result<Self, GlError> {
        let path = path.as_ref();
        let report = glimmer_shader::parse_file_with_report(path)?;
        for marker in &report.ignored_markers {
            log::warn!(
                "{}:{}: marker `{}` names no shader stage; lines up to the next marker are ignored",
                path.display(),
                marker.line,
                marker.text.trim()
            );
        }
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if report.source.stage(stage).is_empty() {
                log::warn!("{}: no {stage} section", path.display());
            }
        }
        Self::from_source(ctx, &report.source)
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn bind(&self) {
        self.ctx.use_program(Some(self.id));
    }

    pub fn unbind(&self) {
        self.ctx.use_program(None);
    }

    /// Looks up a uniform by name. Results, including misses, are cached.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniforms.borrow().get(name) {
            return *cached;
        }
        let location = gl_call!(self.ctx.driver(), uniform_location(self.id, name));
        if location.is_none() {
            log::warn!("uniform `{name}` not found in shader program {}", self.id.get());
        }
        self.uniforms.borrow_mut().insert(name.to_string(), location);
        location
    }

    pub fn try_uniform(&self, name: &str) -> Result<UniformLocation, GlError> {
        self.uniform_location(name)
            .ok_or_else(|| GlError::UniformNotFound(name.to_string()))
    }

    /// Like [`try_uniform`](Self::try_uniform), but a missing uniform aborts
    /// the process.
    pub fn require_uniform(&self, name: &str) -> UniformLocation {
        let location = self.uniform_location(name);
        gl_assert!(location.is_some(), "required uniform `{name}` is missing");
        match location {
            Some(location) => location,
            None => unreachable!("gl_assert aborts on a missing uniform"),
        }
    }

    /// Sets a `vec4` uniform; the program must be bound.
    pub fn set_uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        debug_assert_eq!(self.ctx.bindings().program, Some(self.id), "program not bound");
        gl_call!(self.ctx.driver(), uniform_4f(location, value));
    }

    pub fn set_color(&self, location: UniformLocation, color: Color) {
        self.set_uniform_4f(location, color.to_array());
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        log::debug!("deleting shader program {}", self.id.get());
        self.ctx.delete_program(self.id);
    }
}
