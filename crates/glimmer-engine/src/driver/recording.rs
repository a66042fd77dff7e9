//! Scriptable in-memory driver for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;

use super::{
    BufferId, BufferTarget, GlDriver, Primitive, ProgramId, ShaderId, ShaderStage,
    UniformLocation, VertexArrayId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData { target: BufferTarget, len: usize },
    DeleteBuffer(BufferId),
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    EnableAttrib(u32),
    AttribPointer { index: u32, components: i32, normalized: bool, stride: i32, offset: i32 },
    CreateShader(ShaderStage, ShaderId),
    ShaderSource(ShaderId),
    CompileShader(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    ValidateProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    DeleteProgram(ProgramId),
    UniformLocation(ProgramId, String),
    Uniform4f(UniformLocation, [f32; 4]),
    Viewport(i32, i32, i32, i32),
    Clear,
    DrawElements { mode: Primitive, count: i32, offset: i32 },
}

#[derive(Default)]
struct State {
    next_id: u32,
    calls: Vec<Call>,
    errors: VecDeque<u32>,
    raise_on: HashMap<&'static str, u32>,
    fail_create: bool,
    fail_stage: Option<(ShaderStage, String)>,
    fail_link: Option<String>,
    fail_validate: Option<String>,
    stages: HashMap<ShaderId, ShaderStage>,
    sources: HashMap<ShaderId, String>,
    attached: HashMap<ProgramId, Vec<ShaderId>>,
    linked: HashMap<ProgramId, String>,
    uniforms: HashMap<(ProgramId, String), UniformLocation>,
}

/// Records every call and hands out sequential handles.
///
/// Clones share state, so a test keeps one clone for inspection after moving
/// another into a [`crate::gl::GlContext`].
///
/// A uniform lookup succeeds when the program's linked sources mention the
/// uniform name.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    state: Rc<RefCell<State>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Leaves an error flag in the queue, as if an earlier call raised it.
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().errors.push_back(code);
    }

    /// Raises `code` whenever the named driver method is called.
    pub fn raise_on(&self, method: &'static str, code: u32) {
        self.state.borrow_mut().raise_on.insert(method, code);
    }

    pub fn pending_errors(&self) -> usize {
        self.state.borrow().errors.len()
    }

    /// Makes every `create_*` call fail.
    pub fn fail_create(&self) {
        self.state.borrow_mut().fail_create = true;
    }

    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.state.borrow_mut().fail_stage = Some((stage, log.to_string()));
    }

    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().fail_link = Some(log.to_string());
    }

    pub fn fail_validate(&self, log: &str) {
        self.state.borrow_mut().fail_validate = Some(log.to_string());
    }

    /// Names ever created and not yet deleted, across all object kinds.
    pub fn live_objects(&self) -> Vec<u32> {
        let state = self.state.borrow();
        let mut live = Vec::new();
        for call in &state.calls {
            match call {
                Call::CreateBuffer(id) => live.push(id.get()),
                Call::CreateVertexArray(id) => live.push(id.get()),
                Call::CreateShader(_, id) => live.push(id.get()),
                Call::CreateProgram(id) => live.push(id.get()),
                Call::DeleteBuffer(id) => live.retain(|n| *n != id.get()),
                Call::DeleteVertexArray(id) => live.retain(|n| *n != id.get()),
                Call::DeleteShader(id) => live.retain(|n| *n != id.get()),
                Call::DeleteProgram(id) => live.retain(|n| *n != id.get()),
                _ => {}
            }
        }
        live
    }

    fn record(&self, method: &'static str, call: Call) {
        let mut state = self.state.borrow_mut();
        if let Some(code) = state.raise_on.get(method).copied() {
            state.errors.push_back(code);
        }
        state.calls.push(call);
    }

    fn next_name(&self) -> Result<NonZeroU32, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err("out of object names".to_string());
        }
        state.next_id += 1;
        NonZeroU32::new(state.next_id).ok_or_else(|| "name overflow".to_string())
    }
}

impl GlDriver for RecordingDriver {
    fn get_error(&self) -> u32 {
        self.state.borrow_mut().errors.pop_front().unwrap_or(0)
    }

    fn version_string(&self) -> String {
        "3.3.0 recording".to_string()
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        let id = BufferId(self.next_name()?);
        self.record("create_buffer", Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record("bind_buffer", Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record("buffer_data", Call::BufferData { target, len: data.len() });
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.record("delete_buffer", Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let id = VertexArrayId(self.next_name()?);
        self.record("create_vertex_array", Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        self.record("bind_vertex_array", Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        self.record("delete_vertex_array", Call::DeleteVertexArray(vertex_array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record("enable_vertex_attrib_array", Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        components: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(
            "vertex_attrib_pointer_f32",
            Call::AttribPointer { index, components, normalized, stride, offset },
        );
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let id = ShaderId(self.next_name()?);
        self.state.borrow_mut().stages.insert(id, stage);
        self.record("create_shader", Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.state.borrow_mut().sources.insert(shader, source.to_string());
        self.record("shader_source", Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: ShaderId) {
        self.record("compile_shader", Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let state = self.state.borrow();
        match (&state.fail_stage, state.stages.get(&shader)) {
            (Some((failing, _)), Some(stage)) => failing != stage,
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let state = self.state.borrow();
        match (&state.fail_stage, state.stages.get(&shader)) {
            (Some((failing, log)), Some(stage)) if failing == stage => log.clone(),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record("delete_shader", Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        let id = ProgramId(self.next_name()?);
        self.record("create_program", Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.state.borrow_mut().attached.entry(program).or_default().push(shader);
        self.record("attach_shader", Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let Some(list) = self.state.borrow_mut().attached.get_mut(&program) {
            list.retain(|s| *s != shader);
        }
        self.record("detach_shader", Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) {
        {
            let mut state = self.state.borrow_mut();
            let text: String = state
                .attached
                .get(&program)
                .into_iter()
                .flatten()
                .filter_map(|s| state.sources.get(s).cloned())
                .collect();
            state.linked.insert(program, text);
        }
        self.record("link_program", Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: ProgramId) -> bool {
        self.state.borrow().fail_link.is_none()
    }

    fn validate_program(&self, program: ProgramId) {
        self.record("validate_program", Call::ValidateProgram(program));
    }

    fn program_validate_status(&self, _program: ProgramId) -> bool {
        self.state.borrow().fail_validate.is_none()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        let state = self.state.borrow();
        state.fail_link.clone().or_else(|| state.fail_validate.clone()).unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record("use_program", Call::UseProgram(program));
    }

    fn delete_program(&self, program: ProgramId) {
        self.record("delete_program", Call::DeleteProgram(program));
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.record("uniform_location", Call::UniformLocation(program, name.to_string()));
        let mut state = self.state.borrow_mut();
        let known = state.linked.get(&program).is_some_and(|text| text.contains(name));
        if !known {
            return None;
        }
        let next = state.uniforms.len() as u32;
        Some(*state.uniforms.entry((program, name.to_string())).or_insert(UniformLocation(next)))
    }

    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        self.record("uniform_4f", Call::Uniform4f(location, value));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record("viewport", Call::Viewport(x, y, width, height));
    }

    fn clear_color_buffer(&self) {
        self.record("clear_color_buffer", Call::Clear);
    }

    fn draw_elements(&self, mode: Primitive, count: i32, offset: i32) {
        self.record("draw_elements", Call::DrawElements { mode, count, offset });
    }
}
