// 路由表 - 前端两个页面的导航配置
//
// 只有两条静态路由，无守卫、无重定向、无参数。页面在解析到对应路由时才加载

use serde::{Deserialize, Serialize};

/// 前端页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// 登录页
    Login,
    /// 主页面（寻访记录与统计）
    Main,
}

impl View {
    /// 页面组件路径
    pub fn component(&self) -> &'static str {
        match self {
            View::Login => "routes/Login.vue",
            View::Main => "routes/Main.vue",
        }
    }
}

/// 单条路由
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    loader: fn() -> View,
}

impl Route {
    /// 加载路由对应的页面
    pub fn load(&self) -> View {
        (self.loader)()
    }
}

/// 传给前端的路由描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub path: String,
    pub name: String,
    pub component: String,
}

fn load_login() -> View {
    View::Login
}

fn load_main() -> View {
    View::Main
}

static ROUTES: [Route; 2] = [
    Route {
        path: "/",
        name: "login",
        loader: load_login,
    },
    Route {
        path: "/main",
        name: "main",
        loader: load_main,
    },
];

/// 路由器（hash 模式）
pub struct Router {
    routes: &'static [Route],
}

impl Router {
    pub fn new() -> Self {
        Self { routes: &ROUTES }
    }

    pub fn routes(&self) -> &[Route] {
        self.routes
    }

    /// 按路径查找路由，支持 `#/main` 形式的 hash 地址
    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let path = location.strip_prefix('#').unwrap_or(location);
        let path = if path.is_empty() { "/" } else { path };
        self.routes.iter().find(|route| route.path == path)
    }

    /// 按名称查找路由
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// 解析并加载页面
    pub fn navigate(&self, location: &str) -> Option<View> {
        self.resolve(location).map(Route::load)
    }

    pub fn describe(&self) -> Vec<RouteInfo> {
        self.routes
            .iter()
            .map(|route| RouteInfo {
                path: route.path.to_string(),
                name: route.name.to_string(),
                component: route.load().component().to_string(),
            })
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_login() {
        let router = Router::new();
        assert_eq!(router.navigate("/"), Some(View::Login));
        assert_eq!(router.navigate("#/"), Some(View::Login));
        assert_eq!(router.navigate(""), Some(View::Login));
    }

    #[test]
    fn test_main_route() {
        let router = Router::new();
        assert_eq!(router.navigate("/main"), Some(View::Main));
        assert_eq!(router.navigate("#/main"), Some(View::Main));
        assert_eq!(router.by_name("main").map(|r| r.path), Some("/main"));
    }

    #[test]
    fn test_no_other_routes() {
        let router = Router::new();
        assert_eq!(router.routes().len(), 2);
        assert!(router.resolve("/main/").is_none());
        assert!(router.resolve("/settings").is_none());
        assert!(router.resolve("/main?pool=A").is_none());
    }

    #[test]
    fn test_describe() {
        let routes = Router::new().describe();
        assert_eq!(routes[0].component, "routes/Login.vue");
        assert_eq!(routes[1].name, "main");
    }
}
