use csb::app::{collect_outputs, App};
use csb::cli::{ArtifactKind, Commands, ModeArg};
use csb::config::{Config, GenerationOptions};
use csb::generator::CodeGenerator;
use csb::model::{ElementRecord, OutputMode, StepEntry};
use csb::project::Project;
use csb::workspace::Workspace;
use tokio::fs;

fn workspace() -> Workspace {
    Workspace::new(CodeGenerator::new(GenerationOptions::default()).unwrap())
}

fn balanced(code: &str) -> bool {
    let mut depth = 0i32;
    for c in code.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

#[test]
fn test_login_button_constant() {
    let mut ws = workspace();
    ws.set_model_class("LoginModel").unwrap();
    let id = ws.add_element(ElementRecord::new("login button", "id", "loginBtn"));
    ws.generate_locator(&id).unwrap();

    assert_eq!(
        ws.locator_book().get(&id).unwrap().code,
        r#"public static final By LOGIN_BUTTON = By.id("loginBtn");"#
    );
}

#[test]
fn test_regenerating_an_element_does_not_duplicate_it() {
    let mut ws = workspace();
    let id = ws.add_element(ElementRecord::new("login button", "id", "loginBtn"));
    ws.generate_locator(&id).unwrap();
    ws.update_element(
        &id,
        csb::model::ElementPatch {
            selector: Some("login".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    ws.generate_locator(&id).unwrap();

    assert_eq!(ws.locator_book().len(), 1);
    assert!(ws.artifacts().model.contains(r#"By.id("login")"#));
    assert!(!ws.artifacts().model.contains("loginBtn"));
}

#[test]
fn test_deleting_an_element_removes_its_constant() {
    let mut ws = workspace();
    let keep = ws.add_element(ElementRecord::new("user name", "id", "user"));
    let drop = ws.add_element(ElementRecord::new("login button", "id", "loginBtn"));
    ws.generate_all_locators().unwrap();

    ws.remove_element(&drop).unwrap();
    assert!(ws.locator_book().get(&drop).is_none());
    assert!(ws.locator_book().get(&keep).is_some());
    assert!(!ws.artifacts().model.contains("LOGIN_BUTTON"));
}

#[test]
fn test_gherkin_click_step_end_to_end() {
    let mut ws = workspace();
    ws.set_model_class("LoginModel").unwrap();
    ws.set_output_mode(OutputMode::Gherkin).unwrap();
    ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
    let artifacts = ws.generate_steps().unwrap().clone();

    assert_eq!(ws.trace().len(), 1);
    assert_eq!(ws.trace()[0].text, "I click loginButton on Login Page");
    assert!(artifacts.steps.contains("import io.cucumber.java.en.When;"));
    assert!(artifacts.steps.contains("    @When(\"I click loginButton on Login Page\")"));
    assert!(artifacts.steps.contains("        loginpage.clickLoginButton();"));
    assert!(artifacts.page.contains("        helper.click(LoginModel.LOGIN_BUTTON);"));
    assert!(artifacts.feature.contains("    When I click loginButton on Login Page"));
}

#[test]
fn test_consecutive_when_steps_collapse_in_feature() {
    let mut ws = workspace();
    ws.set_model_class("LoginModel").unwrap();
    ws.set_output_mode(OutputMode::Gherkin).unwrap();
    ws.add_step(StepEntry::new("Login Page", "set saved", "ORDER_NO"));
    ws.add_step(StepEntry::new("Login Page", "send keys", "USERNAME"));
    ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
    ws.add_step(StepEntry::new("Home Page", "should see", "WELCOME"));
    ws.add_step(StepEntry::new("Home Page", "check text", "TITLE"));
    ws.generate_steps().unwrap();

    assert_eq!(
        ws.artifacts().feature,
        "Feature: Login\n\n  Scenario: Login scenario\n\
         \x20   Given I set saved orderNo on Login Page\n\
         \x20   When I fill username on Login Page with \"<text>\"\n\
         \x20   And I click loginButton on Login Page\n\
         \x20   Then I should see welcome on Home Page\n\
         \x20   And I should see text of title on Home Page\n"
    );
}

#[test]
fn test_generation_is_idempotent() {
    let mut ws = workspace();
    ws.set_model_class("CheckoutModel").unwrap();
    ws.set_output_mode(OutputMode::Grid).unwrap();
    ws.add_element(ElementRecord::new("pay now", "css", "button.pay").with_action("click"));
    ws.add_element(ElementRecord::new("card number", "xpath", "//input[@name='cc']").with_action("send keys"));
    ws.add_element(ElementRecord::new("order id", "id", "order").with_action("set saved"));
    ws.generate_all_locators().unwrap();
    ws.derive_steps_from_elements("Checkout Page");

    let first = ws.generate_steps().unwrap().clone();
    ws.generate_all_locators().unwrap();
    let second = ws.generate_steps().unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn test_generated_java_has_balanced_braces() {
    let mut ws = workspace();
    ws.set_model_class("MixedModel").unwrap();
    ws.set_output_mode(OutputMode::Gherkin).unwrap();
    for (action, element) in [
        ("click", "a"),
        ("send keys", "b"),
        ("check", "c"),
        ("check text", "d"),
        ("should see", "e"),
        ("set saved", "f"),
        ("get saved", "g"),
        ("save", "h"),
        ("drag {and} drop", "i"),
    ] {
        ws.add_element(ElementRecord::new(element, "id", &format!("{{{element}}}")));
        ws.add_step(StepEntry::new("Mixed Page", action, element));
    }
    ws.generate_all_locators().unwrap();
    ws.generate_steps().unwrap();

    let artifacts = ws.artifacts();
    assert!(balanced(&artifacts.model));
    assert!(balanced(&artifacts.steps));
    assert!(balanced(&artifacts.page));
}

#[test]
fn test_naming_chain_follows_model_class() {
    let mut ws = workspace();
    ws.set_model_class("SeatSelectionModel").unwrap();
    assert_eq!(ws.names().steps(), "SeatSelectionSteps");
    assert_eq!(ws.names().page(), "SeatSelectionPage");

    ws.set_step_class("BookingStep");
    assert_eq!(ws.names().page(), "BookingPage");

    ws.set_model_class("Cart Models").unwrap();
    assert_eq!(ws.names().model(), "CartModels");
    assert_eq!(ws.names().steps(), "CartSteps");
    assert_eq!(ws.names().page(), "CartPage");
}

#[test]
fn test_collect_outputs_filters_and_names_files() {
    let generator = CodeGenerator::new(GenerationOptions::default()).unwrap();
    let ws = Project::sample().into_workspace(generator, OutputMode::Gherkin).unwrap();

    let all = collect_outputs(&ws, &ArtifactKind::ALL);
    let names: Vec<_> = all.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["LoginModel.java", "LoginSteps.java", "LoginPage.java", "LoginFeature.feature"]
    );

    let only_page = collect_outputs(&ws, &[ArtifactKind::Page]);
    assert_eq!(only_page.len(), 1);
    assert_eq!(only_page[0].kind, ArtifactKind::Page);
}

#[tokio::test]
async fn test_init_then_generate_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("login.yml");
    let out = dir.path().join("generated");

    let mut app = App::with_config(Config::default()).await.unwrap();
    app.run_command(Commands::Init {
        path: project.clone(),
        force: false,
    })
    .await
    .unwrap();
    assert!(project.exists());

    app.run_command(Commands::Generate {
        project: Some(project.clone()),
        dir: None,
        out: Some(out.clone()),
        mode: Some(ModeArg::Grid),
        artifact: vec![],
        continue_on_error: false,
    })
    .await
    .unwrap();

    let steps = fs::read_to_string(out.join("LoginSteps.java")).await.unwrap();
    assert!(steps.contains("@When(\"Login Page, Click, Login Button\")"));
    let model = fs::read_to_string(out.join("LoginModel.java")).await.unwrap();
    assert!(model.contains(r#"public static final By LOGIN_BUTTON = By.id("loginBtn");"#));
    assert!(out.join("LoginPage.java").exists());
    assert!(out.join("LoginFeature.feature").exists());
}

#[tokio::test]
async fn test_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("login.yml");
    fs::write(&project, "modelClass: Keep\n").await.unwrap();

    let mut app = App::with_config(Config::default()).await.unwrap();
    let result = app
        .run_command(Commands::Init {
            path: project.clone(),
            force: false,
        })
        .await;
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&project).await.unwrap(), "modelClass: Keep\n");
}

#[tokio::test]
async fn test_batch_continues_past_broken_projects() {
    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("projects");
    let out = dir.path().join("out");
    fs::create_dir_all(&projects).await.unwrap();
    Project::sample().save(&projects.join("login.json")).await.unwrap();
    fs::write(projects.join("broken.yml"), "elements: [").await.unwrap();
    fs::write(projects.join("notes.txt"), "ignored").await.unwrap();

    let mut app = App::with_config(Config::default()).await.unwrap();
    app.run_command(Commands::Generate {
        project: None,
        dir: Some(projects.clone()),
        out: Some(out.clone()),
        mode: None,
        artifact: vec![ArtifactKind::Model],
        continue_on_error: true,
    })
    .await
    .unwrap();

    assert!(out.join("login").join("LoginModel.java").exists());
    assert!(!out.join("login").join("LoginSteps.java").exists());
    assert!(!out.join("broken").exists());
}

#[tokio::test]
async fn test_batch_stops_on_error_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.yml"), "elements: [").await.unwrap();

    let mut app = App::with_config(Config::default()).await.unwrap();
    let result = app
        .run_command(Commands::Generate {
            project: None,
            dir: Some(dir.path().to_path_buf()),
            out: None,
            mode: None,
            artifact: vec![],
            continue_on_error: false,
        })
        .await;
    assert!(result.is_err());
}
