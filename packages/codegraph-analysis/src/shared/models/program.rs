//! Program arena and builder
//!
//! `Program` owns every class, field, method and variable of the analyzed
//! code. It is immutable once built; analyses only read it.

use super::hierarchy::ClassHierarchy;
use super::ir::{ClassId, FieldId, MethodBody, MethodId, Stmt, Type, VarId};
use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub super_class: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub is_interface: bool,
    pub is_abstract: bool,
    /// Declared methods keyed by subsignature
    methods: FxHashMap<String, MethodId>,
    fields: Vec<FieldId>,
}

impl Class {
    pub fn declared_method(&self, subsignature: &str) -> Option<MethodId> {
        self.methods.get(subsignature).copied()
    }

    pub fn declared_methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.methods.values().copied()
    }

    pub fn declared_fields(&self) -> &[FieldId] {
        &self.fields
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub declaring_class: ClassId,
    pub ty: Type,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub id: MethodId,
    /// e.g. `int foo(int,java.lang.String)`
    pub subsignature: String,
    pub declaring_class: ClassId,
    pub is_static: bool,
    pub is_abstract: bool,
    pub body: Option<MethodBody>,
}

impl Method {
    /// Simple name extracted from the subsignature
    pub fn name(&self) -> &str {
        let head = self
            .subsignature
            .split('(')
            .next()
            .unwrap_or(&self.subsignature);
        head.rsplit(' ').next().unwrap_or(head)
    }
}

#[derive(Debug, Clone)]
pub struct Var {
    pub id: VarId,
    pub name: String,
    pub ty: Type,
    pub method: MethodId,
}

#[derive(Debug, Clone)]
pub struct Program {
    classes: Vec<Class>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    vars: Vec<Var>,
    entry: Option<MethodId>,
    root_class: Option<ClassId>,
    hierarchy: ClassHierarchy,
}

impl Program {
    #[inline]
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id.index()]
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id.index()]
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn entry_method(&self) -> Option<MethodId> {
        self.entry
    }

    pub fn root_class(&self) -> Option<ClassId> {
        self.root_class
    }

    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    pub fn body(&self, method: MethodId) -> Option<&MethodBody> {
        self.method(method).body.as_ref()
    }

    /// Body of `method`, or `MissingBody` for abstract/native methods
    pub fn require_body(&self, method: MethodId) -> Result<&MethodBody> {
        self.body(method)
            .ok_or_else(|| AnalysisError::MissingBody(self.signature(method)))
    }

    pub fn stmt(&self, method: MethodId, index: usize) -> Option<&Stmt> {
        self.body(method).and_then(|b| b.stmt(index))
    }

    /// `<Class: subsignature>`
    pub fn signature(&self, method: MethodId) -> String {
        let m = self.method(method);
        format!("<{}: {}>", self.class(m.declaring_class).name, m.subsignature)
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.classes.iter().find(|c| c.name == name).map(|c| c.id)
    }

    /// Look up a method by its full `<Class: subsignature>` signature
    pub fn method_by_signature(&self, signature: &str) -> Option<MethodId> {
        let inner = signature.strip_prefix('<')?.strip_suffix('>')?;
        let (class_name, subsig) = inner.split_once(": ")?;
        self.class(self.class_by_name(class_name)?)
            .declared_method(subsig.trim())
    }

    /// Parameters of `method` (empty for body-less methods)
    pub fn params(&self, method: MethodId) -> &[VarId] {
        self.body(method).map(|b| b.params.as_slice()).unwrap_or(&[])
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Builder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Incremental constructor for [`Program`].
///
/// Handles are allocated densely in insertion order. `build` checks that
/// jump targets stay inside their body and that variables are used by the
/// method that owns them.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    classes: Vec<Class>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    vars: Vec<Var>,
    entry: Option<MethodId>,
    root_class: Option<ClassId>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_class(&mut self, name: &str, super_class: Option<ClassId>, is_interface: bool) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(Class {
            id,
            name: name.to_string(),
            super_class,
            interfaces: Vec::new(),
            is_interface,
            is_abstract: is_interface,
            methods: FxHashMap::default(),
            fields: Vec::new(),
        });
        id
    }

    pub fn add_class(&mut self, name: &str, super_class: Option<ClassId>) -> ClassId {
        self.push_class(name, super_class, false)
    }

    /// Interfaces record their super-interfaces in `interfaces`
    pub fn add_interface(&mut self, name: &str, super_interfaces: &[ClassId]) -> ClassId {
        let id = self.push_class(name, None, true);
        self.classes[id.index()].interfaces = super_interfaces.to_vec();
        id
    }

    pub fn implement(&mut self, class: ClassId, interface: ClassId) -> &mut Self {
        let c = &mut self.classes[class.index()];
        if !c.interfaces.contains(&interface) {
            c.interfaces.push(interface);
        }
        self
    }

    pub fn set_abstract(&mut self, class: ClassId) -> &mut Self {
        self.classes[class.index()].is_abstract = true;
        self
    }

    /// Root of the class hierarchy; array receivers dispatch from here
    pub fn set_root_class(&mut self, class: ClassId) -> &mut Self {
        self.root_class = Some(class);
        self
    }

    pub fn add_field(&mut self, class: ClassId, name: &str, ty: Type, is_static: bool) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(Field {
            id,
            name: name.to_string(),
            declaring_class: class,
            ty,
            is_static,
        });
        self.classes[class.index()].fields.push(id);
        id
    }

    fn push_method(
        &mut self,
        class: ClassId,
        subsignature: &str,
        is_static: bool,
        is_abstract: bool,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(Method {
            id,
            subsignature: subsignature.to_string(),
            declaring_class: class,
            is_static,
            is_abstract,
            body: None,
        });
        self.classes[class.index()]
            .methods
            .insert(subsignature.to_string(), id);
        id
    }

    /// Concrete method; attach its statements with [`set_body`](Self::set_body)
    pub fn add_method(&mut self, class: ClassId, subsignature: &str, is_static: bool) -> MethodId {
        self.push_method(class, subsignature, is_static, false)
    }

    pub fn add_abstract_method(&mut self, class: ClassId, subsignature: &str) -> MethodId {
        self.push_method(class, subsignature, false, true)
    }

    pub fn new_var(&mut self, method: MethodId, name: &str, ty: Type) -> VarId {
        let id = VarId(self.vars.len() as u32);
        self.vars.push(Var {
            id,
            name: name.to_string(),
            ty,
            method,
        });
        id
    }

    pub fn set_body(
        &mut self,
        method: MethodId,
        this: Option<VarId>,
        params: Vec<VarId>,
        stmts: Vec<Stmt>,
    ) -> &mut Self {
        self.methods[method.index()].body = Some(MethodBody::new(this, params, stmts));
        self
    }

    pub fn set_entry(&mut self, method: MethodId) -> &mut Self {
        self.entry = Some(method);
        self
    }

    pub fn build(self) -> Result<Program> {
        for method in &self.methods {
            let Some(body) = &method.body else {
                continue;
            };
            let sig = || {
                format!(
                    "<{}: {}>",
                    self.classes[method.declaring_class.index()].name,
                    method.subsignature
                )
            };

            if method.is_abstract {
                return Err(AnalysisError::malformed(sig(), "abstract method has a body"));
            }
            if method.is_static && body.this.is_some() {
                return Err(AnalysisError::malformed(sig(), "static method declares `this`"));
            }

            let len = body.len();
            for (i, stmt) in body.stmts.iter().enumerate() {
                if let Some(t) = stmt.jump_targets().into_iter().find(|&t| t >= len) {
                    return Err(AnalysisError::malformed(
                        sig(),
                        format!("statement {} jumps to {} (body has {} statements)", i, t, len),
                    ));
                }
                let foreign = stmt
                    .def()
                    .into_iter()
                    .chain(stmt.uses())
                    .find(|v| self.vars.get(v.index()).map(|var| var.method) != Some(method.id));
                if let Some(v) = foreign {
                    return Err(AnalysisError::malformed(
                        sig(),
                        format!("statement {} uses variable {} of another method", i, v),
                    ));
                }
            }
        }

        if let Some(entry) = self.entry {
            if entry.index() >= self.methods.len() {
                return Err(AnalysisError::EntryNotFound(entry.to_string()));
            }
        }

        let hierarchy = ClassHierarchy::new(&self.classes);
        Ok(Program {
            classes: self.classes,
            fields: self.fields,
            methods: self.methods,
            vars: self.vars,
            entry: self.entry,
            root_class: self.root_class,
            hierarchy,
        })
    }
}
