use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use workflow_broker::client::{
    CompileOutcome, DependencyMode, DeploymentExecutor, DeploymentOutcome, DeploymentPackage,
    DeploymentServer, DeploymentSession, EnvironmentField, EnvironmentInstance, EnvironmentServer,
    EnvironmentTemplate, ItemQuery, PackageItem, PackageSelection, Project, ProjectSystem,
};
use workflow_broker::deploy::{
    BuildDeployOptions, PackageOptions, build_and_deploy, build_package,
};
use workflow_broker::errors::{Error, Result, environment_resolution_error};

/// Records every call the packaging command makes against the server.
#[derive(Default)]
struct SessionLog {
    session_names: Vec<String>,
    options: Vec<(String, bool)>,
    queries: Vec<ItemQuery>,
    selections: Vec<PackageSelection>,
    closes: u32,
    fail_query: bool,
}

struct MockSession {
    name: String,
    items: Vec<PackageItem>,
    image: Vec<u8>,
    log: Rc<RefCell<SessionLog>>,
}

impl DeploymentSession for MockSession {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_option(&mut self, name: &str, value: bool) -> Result<()> {
        self.log.borrow_mut().options.push((name.to_string(), value));
        Ok(())
    }

    fn find_items(&mut self, query: &ItemQuery) -> Result<Vec<PackageItem>> {
        let mut log = self.log.borrow_mut();
        log.queries.push(query.clone());
        if log.fail_query {
            return Err(Error::Query {
                pattern: query.name_pattern.clone(),
                namespace: query.namespace.clone(),
                detail: "server unavailable".to_string(),
            });
        }
        Ok(self.items.clone())
    }

    fn package_items(&mut self, selection: &PackageSelection) -> Result<Vec<u8>> {
        self.log.borrow_mut().selections.push(selection.clone());
        Ok(self.image.clone())
    }

    fn close(&mut self) -> Result<()> {
        self.log.borrow_mut().closes += 1;
        Ok(())
    }
}

struct MockDeploymentServer {
    items: Vec<PackageItem>,
    image: Vec<u8>,
    log: Rc<RefCell<SessionLog>>,
}

impl MockDeploymentServer {
    fn new(items: Vec<PackageItem>) -> Self {
        MockDeploymentServer {
            items,
            image: b"package-image".to_vec(),
            log: Rc::new(RefCell::new(SessionLog::default())),
        }
    }

    fn log(&self) -> Rc<RefCell<SessionLog>> {
        Rc::clone(&self.log)
    }
}

impl DeploymentServer for MockDeploymentServer {
    fn create_session(&self, name: &str) -> Result<Box<dyn DeploymentSession>> {
        self.log.borrow_mut().session_names.push(name.to_string());
        Ok(Box::new(MockSession {
            name: name.to_string(),
            items: self.items.clone(),
            image: self.image.clone(),
            log: Rc::clone(&self.log),
        }))
    }
}

fn item(name: &str, dependencies: &[&str]) -> PackageItem {
    PackageItem {
        name: name.to_string(),
        namespace: "urn:SourceCode/Workflows".to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
    }
}

fn package_options(output_path: &Path) -> PackageOptions {
    PackageOptions {
        output_path: output_path.to_path_buf(),
        name_pattern: "Rota.Processes\\*".to_string(),
        namespace: "urn:SourceCode/Workflows".to_string(),
        validate: false,
        dependencies_as_reference: false,
    }
}

#[test]
fn test_packaging_writes_image_and_closes_session() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rota.kspx");
    let server = MockDeploymentServer::new(vec![item("Rota.Approve", &[])]);
    let log = server.log();

    build_package(&server, &package_options(&output)).unwrap();

    let log = log.borrow();
    assert_eq!(log.session_names.len(), 1);
    assert!(log.session_names[0].starts_with("wfbroker-"));
    assert_eq!(log.options, vec![("NoAnalyze".to_string(), true)]);
    assert_eq!(log.queries.len(), 1);
    assert_eq!(log.queries[0].name_pattern, "Rota.Processes\\*");
    assert_eq!(log.closes, 1);

    let written = fs::read(&output).unwrap();
    assert_eq!(written, b"package-image");
}

#[test]
fn test_packaging_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rota.kspx");
    fs::write(&output, b"stale content from a previous run").unwrap();
    let server = MockDeploymentServer::new(vec![item("Rota.Approve", &[])]);

    build_package(&server, &package_options(&output)).unwrap();

    assert_eq!(fs::read(&output).unwrap(), b"package-image");
}

#[test]
fn test_shared_dependency_is_inlined_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rota.kspx");
    let server = MockDeploymentServer::new(vec![
        item("Rota.Approve", &["Shared.Forms"]),
        item("Rota.Reject", &["Shared.Forms"]),
    ]);
    let log = server.log();

    build_package(&server, &package_options(&output)).unwrap();

    let log = log.borrow();
    let selection = &log.selections[0];
    assert_eq!(selection.items.len(), 2);
    assert_eq!(selection.dependency_mode, DependencyMode::Inline);
    assert_eq!(
        selection.dependencies,
        vec!["Shared.Forms"],
        "a dependency shared by two items must be inlined once"
    );
}

#[test]
fn test_reference_flag_switches_dependency_mode() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rota.kspx");
    let server = MockDeploymentServer::new(vec![item("Rota.Approve", &["Shared.Forms"])]);
    let log = server.log();

    let mut options = package_options(&output);
    options.dependencies_as_reference = true;
    options.validate = true;
    build_package(&server, &options).unwrap();

    let log = log.borrow();
    let selection = &log.selections[0];
    assert_eq!(selection.dependency_mode, DependencyMode::Reference);
    assert!(selection.validate);
}

#[test]
fn test_query_failure_propagates_without_packaging() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("rota.kspx");
    let server = MockDeploymentServer::new(vec![]);
    server.log().borrow_mut().fail_query = true;
    let log = server.log();

    let error = build_package(&server, &package_options(&output)).unwrap_err();

    assert!(matches!(error, Error::Query { .. }));
    assert!(log.borrow().selections.is_empty());
    assert!(!output.exists(), "no package file may be written on failure");
}

/// Tracks which build-and-deploy collaborators were touched.
#[derive(Default)]
struct DeployLog {
    refreshes: u32,
    template_lookups: Vec<String>,
    executed: Vec<DeploymentPackage>,
}

struct MockProjectSystem {
    compile: CompileOutcome,
}

impl ProjectSystem for MockProjectSystem {
    fn load(&self, path: &Path) -> Result<Project> {
        Ok(Project {
            path: path.to_path_buf(),
            name: "Rota".to_string(),
            content: "<Project />".to_string(),
        })
    }

    fn compile(&self, _project: &Project) -> Result<CompileOutcome> {
        Ok(CompileOutcome {
            successful: self.compile.successful,
            errors: self.compile.errors.clone(),
        })
    }
}

struct MockEnvironmentServer {
    template: EnvironmentTemplate,
    log: Rc<RefCell<DeployLog>>,
}

impl EnvironmentServer for MockEnvironmentServer {
    fn refresh(&self) -> Result<()> {
        self.log.borrow_mut().refreshes += 1;
        Ok(())
    }

    fn template(&self, name: &str) -> Result<EnvironmentTemplate> {
        self.log.borrow_mut().template_lookups.push(name.to_string());
        if self.template.name == name {
            Ok(self.template.clone())
        } else {
            Err(environment_resolution_error("environment template", name))
        }
    }
}

struct MockExecutor {
    successful: bool,
    log: Rc<RefCell<DeployLog>>,
}

impl DeploymentExecutor for MockExecutor {
    fn execute(&self, package: &DeploymentPackage) -> Result<DeploymentOutcome> {
        self.log.borrow_mut().executed.push(package.clone());
        Ok(DeploymentOutcome {
            successful: self.successful,
            message: if self.successful {
                String::new()
            } else {
                "target server refused the package".to_string()
            },
        })
    }
}

fn production_template() -> EnvironmentTemplate {
    EnvironmentTemplate {
        name: "K2 Blackbird".to_string(),
        environments: vec![EnvironmentInstance {
            name: "Production".to_string(),
            fields: vec![
                EnvironmentField {
                    name: "Web Service URL".to_string(),
                    value: "http://k2server/ws".to_string(),
                },
                EnvironmentField {
                    name: "Mail Server".to_string(),
                    value: "smtp.internal".to_string(),
                },
            ],
        }],
    }
}

fn build_options() -> BuildDeployOptions {
    BuildDeployOptions {
        project_path: PathBuf::from("/builds/Rota.k2proj"),
        template: "K2 Blackbird".to_string(),
        environment: "Production".to_string(),
        server: "k2server".to_string(),
    }
}

#[test]
fn test_successful_build_and_deploy_binds_environment() {
    let log = Rc::new(RefCell::new(DeployLog::default()));
    let projects = MockProjectSystem {
        compile: CompileOutcome {
            successful: true,
            errors: vec![],
        },
    };
    let environments = MockEnvironmentServer {
        template: production_template(),
        log: Rc::clone(&log),
    };
    let executor = MockExecutor {
        successful: true,
        log: Rc::clone(&log),
    };

    build_and_deploy(&projects, &environments, &executor, &build_options()).unwrap();

    let log = log.borrow();
    assert_eq!(log.refreshes, 1);
    assert_eq!(log.executed.len(), 1);

    let package = &log.executed[0];
    assert_eq!(package.project_name, "Rota");
    assert_eq!(package.selected_environment, "Production");
    assert_eq!(
        package.label_description,
        "Template: K2 Blackbird, Environment: Production"
    );
    assert_eq!(
        package.environment_properties,
        vec![
            (
                "Web Service URL".to_string(),
                "http://k2server/ws".to_string()
            ),
            ("Mail Server".to_string(), "smtp.internal".to_string()),
        ],
        "environment fields must be copied in server order"
    );
    assert_eq!(
        package.smartobject_connection_string,
        package.workflow_management_connection_string
    );
    assert!(package.smartobject_connection_string.contains("Host=k2server"));
    assert!(!package.test_only);
}

#[test]
fn test_compile_failure_prevents_environment_traffic() {
    let log = Rc::new(RefCell::new(DeployLog::default()));
    let projects = MockProjectSystem {
        compile: CompileOutcome {
            successful: false,
            errors: vec![
                "'Approve' activity has no outgoing line".to_string(),
                "secondary diagnostic".to_string(),
            ],
        },
    };
    let environments = MockEnvironmentServer {
        template: production_template(),
        log: Rc::clone(&log),
    };
    let executor = MockExecutor {
        successful: true,
        log: Rc::clone(&log),
    };

    let error =
        build_and_deploy(&projects, &environments, &executor, &build_options()).unwrap_err();

    match error {
        Error::Compile { message } => {
            assert_eq!(message, "'Approve' activity has no outgoing line");
        }
        other => panic!("expected a compile error, got {other}"),
    }

    let log = log.borrow();
    assert_eq!(
        log.refreshes, 0,
        "the environment server must not be contacted after a compile failure"
    );
    assert!(log.template_lookups.is_empty());
    assert!(log.executed.is_empty());
}

#[test]
fn test_unknown_environment_fails_resolution_before_deploying() {
    let log = Rc::new(RefCell::new(DeployLog::default()));
    let projects = MockProjectSystem {
        compile: CompileOutcome {
            successful: true,
            errors: vec![],
        },
    };
    let environments = MockEnvironmentServer {
        template: production_template(),
        log: Rc::clone(&log),
    };
    let executor = MockExecutor {
        successful: true,
        log: Rc::clone(&log),
    };

    let mut options = build_options();
    options.environment = "Staging".to_string();
    let error = build_and_deploy(&projects, &environments, &executor, &options).unwrap_err();

    assert!(matches!(error, Error::EnvironmentResolution { .. }));
    assert!(log.borrow().executed.is_empty());
}

#[test]
fn test_unsuccessful_deployment_is_terminal() {
    let log = Rc::new(RefCell::new(DeployLog::default()));
    let projects = MockProjectSystem {
        compile: CompileOutcome {
            successful: true,
            errors: vec![],
        },
    };
    let environments = MockEnvironmentServer {
        template: production_template(),
        log: Rc::clone(&log),
    };
    let executor = MockExecutor {
        successful: false,
        log: Rc::clone(&log),
    };

    let error =
        build_and_deploy(&projects, &environments, &executor, &build_options()).unwrap_err();

    assert!(matches!(error, Error::Deployment { .. }));
    assert_eq!(log.borrow().executed.len(), 1, "execution is attempted once");
}
