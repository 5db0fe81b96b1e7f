use crate::block::Block;
use crate::eval::{self, Scope};
use crate::ignore::IgnoreDirective;
use crate::index::ReferenceIndex;
use crate::kinds;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tfguard_types::SourcePath;

/// Identity of a module within one load. Never reused across modules of the same scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// One evaluated configuration scope: the root directory or a local module call.
///
/// Immutable once built; share it with `Arc`.
#[derive(Debug)]
pub struct Module {
    pub(crate) id: ModuleId,
    name: String,
    dir: SourcePath,
    files: Vec<SourcePath>,
    pub(crate) blocks: Vec<Block>,
    variables: BTreeMap<String, Value>,
    locals: BTreeMap<String, Value>,
    pub(crate) index: ReferenceIndex,
    parent: Option<Arc<Module>>,
    ignores: Vec<IgnoreDirective>,
}

impl Module {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// `root`, or the label of the module call that created this scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &SourcePath {
        &self.dir
    }

    /// Files that contributed blocks, sorted by path.
    pub fn files(&self) -> &[SourcePath] {
        &self.files
    }

    /// Top-level blocks in source order, files sorted by path.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks.iter().filter(move |b| b.kind() == kind)
    }

    /// Number of blocks at every nesting level.
    pub fn block_count(&self) -> usize {
        fn count(blocks: &[Block]) -> usize {
            blocks.iter().map(|b| 1 + count(b.nested_blocks())).sum()
        }
        count(&self.blocks)
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }

    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    pub fn parent(&self) -> Option<&Module> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Enclosing modules, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Module> {
        std::iter::successors(self.parent(), |m| m.parent())
    }

    /// This module followed by its ancestors.
    pub(crate) fn scopes(&self) -> impl Iterator<Item = &Module> {
        std::iter::successors(Some(self), |m| m.parent())
    }

    pub fn ignores(&self) -> &[IgnoreDirective] {
        &self.ignores
    }

    /// First top-level block of this module with exactly this address.
    pub fn find_block(&self, kind: &str, labels: &[&str]) -> Option<&Block> {
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        self.index
            .lookup(kind, &labels)
            .first()
            .and_then(|&i| self.blocks.get(i))
    }
}

struct SourceFile {
    path: SourcePath,
    blocks: Vec<Block>,
    ignores: Vec<IgnoreDirective>,
}

/// Collects parsed files for one scope, then evaluates and freezes them into a [`Module`].
pub struct ModuleBuilder {
    id: ModuleId,
    name: String,
    dir: SourcePath,
    parent: Option<Arc<Module>>,
    inputs: BTreeMap<String, Value>,
    files: Vec<SourceFile>,
}

impl ModuleBuilder {
    pub fn new(id: ModuleId, name: impl Into<String>, dir: SourcePath) -> Self {
        Self {
            id,
            name: name.into(),
            dir,
            parent: None,
            inputs: BTreeMap::new(),
            files: Vec::new(),
        }
    }

    pub fn parent(mut self, parent: Arc<Module>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Values that override `variable` defaults (module-call arguments or tfvars).
    pub fn inputs(mut self, inputs: BTreeMap<String, Value>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn add_file(
        &mut self,
        path: SourcePath,
        blocks: Vec<Block>,
        ignores: Vec<IgnoreDirective>,
    ) -> &mut Self {
        self.files.push(SourceFile {
            path,
            blocks,
            ignores,
        });
        self
    }

    pub fn build(self) -> Module {
        let ModuleBuilder {
            id,
            name,
            dir,
            parent,
            inputs,
            mut files,
        } = self;

        files.sort_by(|a, b| a.path.cmp(&b.path));
        let mut paths = Vec::with_capacity(files.len());
        let mut blocks = Vec::new();
        let mut ignores = Vec::new();
        for file in files {
            paths.push(file.path);
            blocks.extend(file.blocks);
            ignores.extend(file.ignores);
        }

        let mut next = 0;
        for b in &mut blocks {
            b.assign_ids(id, &mut next);
        }

        let variables = variable_bindings(&blocks, inputs);
        let locals = evaluate_locals(&blocks, &variables);
        let scope = Scope {
            variables: &variables,
            locals: &locals,
        };
        for b in &mut blocks {
            evaluate_block(b, &scope);
        }

        let index = ReferenceIndex::build(&blocks);
        tracing::debug!(
            module = %name,
            dir = %dir,
            blocks = blocks.len(),
            variables = variables.len(),
            locals = locals.len(),
            addresses = index.len(),
            "built module"
        );

        Module {
            id,
            name,
            dir,
            files: paths,
            blocks,
            variables,
            locals,
            index,
            parent,
            ignores,
        }
    }
}

fn variable_bindings(
    blocks: &[Block],
    inputs: BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    let empty = BTreeMap::new();
    let literal_scope = Scope {
        variables: &empty,
        locals: &empty,
    };
    let mut out = BTreeMap::new();
    for b in blocks.iter().filter(|b| b.is_kind(kinds::VARIABLE)) {
        let Some(name) = b.name_label() else {
            continue;
        };
        let default = b
            .attribute("default")
            .map(|a| eval::evaluate(a.expr(), &literal_scope))
            .unwrap_or_default();
        out.insert(name.to_string(), default);
    }
    out.extend(inputs);
    out
}

/// Repeated passes until nothing changes, so locals may reference each other in any order.
/// Cyclic locals stay `Null`.
fn evaluate_locals(blocks: &[Block], variables: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    let defs: Vec<_> = blocks
        .iter()
        .filter(|b| b.is_kind(kinds::LOCALS))
        .flat_map(|b| b.attributes())
        .collect();
    let mut locals: BTreeMap<String, Value> = defs
        .iter()
        .map(|a| (a.name().to_string(), Value::Null))
        .collect();

    for _ in 0..=defs.len() {
        let mut changed = false;
        for def in &defs {
            let value = eval::evaluate(
                def.expr(),
                &Scope {
                    variables,
                    locals: &locals,
                },
            );
            if locals.get(def.name()) != Some(&value) {
                locals.insert(def.name().to_string(), value);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    locals
}

fn evaluate_block(block: &mut Block, scope: &Scope<'_>) {
    for a in block.attributes_mut() {
        a.value = eval::evaluate(a.expr(), scope);
    }
    for child in block.nested_blocks_mut() {
        evaluate_block(child, scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeQuery;
    use crate::test_support::{attr, attr_expr, block_with, module_from, traversal};

    #[test]
    fn inputs_override_variable_defaults() {
        let blocks = vec![
            block_with("variable", &["region"], vec![attr("default", Value::from("eu-west-1"))]),
            block_with("variable", &["zone"], vec![]),
        ];
        let mut inputs = BTreeMap::new();
        inputs.insert("region".to_string(), Value::from("us-east-1"));
        inputs.insert("undeclared".to_string(), Value::from(true));

        let mut builder = ModuleBuilder::new(ModuleId(0), "root", SourcePath::default()).inputs(inputs);
        builder.add_file(SourcePath::new("variables.tf"), blocks, Vec::new());
        let module = builder.build();

        assert_eq!(module.variable("region"), Some(&Value::from("us-east-1")));
        assert_eq!(module.variable("zone"), Some(&Value::Null));
        assert_eq!(module.variable("undeclared"), Some(&Value::from(true)));
    }

    #[test]
    fn locals_reach_a_fixpoint_in_any_order() {
        let module = module_from(vec![
            block_with(
                "locals",
                &[],
                vec![
                    attr_expr("algorithm", traversal("local", &["base"])),
                    attr_expr("cycle_a", traversal("local", &["cycle_b"])),
                    attr_expr("cycle_b", traversal("local", &["cycle_a"])),
                ],
            ),
            block_with("locals", &[], vec![attr("base", Value::from("rsasha1"))]),
        ]);
        assert_eq!(module.local("algorithm"), Some(&Value::from("rsasha1")));
        assert_eq!(module.local("cycle_a"), Some(&Value::Null));
    }

    #[test]
    fn attribute_values_are_evaluated_in_nested_blocks() {
        let mut fw = block_with("resource", &["digitalocean_firewall", "web"], vec![]);
        fw.add_block(block_with(
            "inbound_rule",
            &[],
            vec![attr_expr(
                "source_addresses",
                crate::Expr::List(vec![traversal("var", &["open"])]),
            )],
        ));
        let var = block_with("variable", &["open"], vec![attr("default", Value::from("0.0.0.0/0"))]);
        let module = module_from(vec![var, fw]);

        let fw = module
            .find_block("resource", &["digitalocean_firewall", "web"])
            .expect("firewall");
        let rule = fw.block("inbound_rule").expect("inbound_rule");
        assert!(rule.attribute("source_addresses").contains("0.0.0.0/0"));
        assert_eq!(module.block_count(), 3);
    }

    #[test]
    fn files_are_ordered_by_path_and_ids_follow() {
        let mut builder = ModuleBuilder::new(ModuleId(7), "root", SourcePath::default());
        builder.add_file(
            SourcePath::new("z.tf"),
            vec![block_with("resource", &["aws_ebs_volume", "z"], vec![])],
            Vec::new(),
        );
        builder.add_file(
            SourcePath::new("a.tf"),
            vec![block_with("resource", &["aws_ebs_volume", "a"], vec![])],
            Vec::new(),
        );
        let module = builder.build();
        let names: Vec<String> = module.blocks().iter().map(Block::full_name).collect();
        assert_eq!(names, vec!["aws_ebs_volume.a", "aws_ebs_volume.z"]);
        assert_eq!(module.blocks()[1].id().index, 1);
        assert_eq!(module.blocks()[1].id().module, ModuleId(7));
        assert_eq!(module.files(), [SourcePath::new("a.tf"), SourcePath::new("z.tf")]);
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let root = Arc::new(module_from(Vec::new()));
        let child = Arc::new(
            ModuleBuilder::new(ModuleId(1), "db", SourcePath::new("modules/db"))
                .parent(root.clone())
                .build(),
        );
        let grandchild = ModuleBuilder::new(ModuleId(2), "inner", SourcePath::new("modules/db/inner"))
            .parent(child)
            .build();
        let names: Vec<&str> = grandchild.ancestors().map(Module::name).collect();
        assert_eq!(names, vec!["db", "root"]);
        assert!(!grandchild.is_root());
        assert!(root.is_root());
    }
}
